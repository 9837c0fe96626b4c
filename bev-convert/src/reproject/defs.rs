//! Définitions proj épinglées des systèmes du domaine
//!
//! Les systèmes MGI historiques (31254/31255/31256, 31287) sont donnés en
//! paramètres explicites, +towgs84 du BEV compris : résoudre ces codes par
//! le registre applique des paramètres de datum par défaut qui décalent les
//! adresses de plusieurs centaines de mètres. Le suffixe +type=crs est
//! requis pour que le moteur accepte ces chaînes comme des CRS complets.

/// Codes sources attendus dans la colonne EPSG d'ADRESSE.csv
pub const SOURCE_CODES: &[u32] = &[31254, 31255, 31256];

const DEFINITIONS: &[(u32, &str)] = &[
    // MGI / Gauss-Krüger autrichien : zones ouest, centre, est
    (
        31254,
        "+proj=tmerc +lat_0=0 +lon_0=10.33333333333333 +k=1 +x_0=0 +y_0=-5000000 +ellps=bessel +towgs84=577.326,90.129,463.919,5.137,1.474,5.297,2.4232 +units=m +no_defs +type=crs",
    ),
    (
        31255,
        "+proj=tmerc +lat_0=0 +lon_0=13.33333333333333 +k=1 +x_0=0 +y_0=-5000000 +ellps=bessel +towgs84=577.326,90.129,463.919,5.137,1.474,5.297,2.4232 +units=m +no_defs +type=crs",
    ),
    (
        31256,
        "+proj=tmerc +lat_0=0 +lon_0=16.33333333333333 +k=1 +x_0=0 +y_0=-5000000 +ellps=bessel +towgs84=577.326,90.129,463.919,5.137,1.474,5.297,2.4232 +units=m +no_defs +type=crs",
    ),
    // MGI / Austria Lambert, cible par défaut
    (
        31287,
        "+proj=lcc +lat_1=49 +lat_2=46 +lat_0=47.5 +lon_0=13.33333333333333 +x_0=400000 +y_0=400000 +ellps=bessel +towgs84=577.326,90.129,463.919,5.137,1.474,5.297,2.4232 +units=m +no_defs +type=crs",
    ),
    // Cibles web usuelles
    (4326, "+proj=longlat +datum=WGS84 +no_defs +type=crs"),
    (
        3857,
        "+proj=merc +a=6378137 +b=6378137 +lat_ts=0 +lon_0=0 +x_0=0 +y_0=0 +k=1 +units=m +nadgrids=@null +no_defs +type=crs",
    ),
];

/// Définition épinglée d'un code connu
pub fn definition(epsg: u32) -> Option<&'static str> {
    DEFINITIONS
        .iter()
        .find(|(code, _)| *code == epsg)
        .map(|&(_, def)| def)
}
