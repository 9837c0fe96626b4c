//! Types de données pour l'extrait d'adresses BEV

use geo::Coord;

/// Positions des colonnes dans ADRESSE.csv
///
/// L'ordre des colonnes est fixé par le dictionnaire de données du BEV
/// (« Adresse-GWR Online »). Les enregistrements peuvent porter des colonnes
/// supplémentaires en fin de ligne selon le millésime ; elles sont ignorées.
pub mod columns {
    /// Clé d'adresse
    pub const ADRCD: usize = 0;
    /// Code commune (Gemeindekennziffer)
    pub const GKZ: usize = 1;
    /// Code localité (Ortschaftskennziffer)
    pub const OKZ: usize = 2;
    /// Code postal
    pub const PLZ: usize = 3;
    /// Code rue (Straßenkennziffer)
    pub const SKZ: usize = 4;
    /// Secteur de recensement
    pub const ZAEHLSPRENGEL: usize = 5;
    /// Numéro de maison, partie texte libre
    pub const HAUSNRTEXT: usize = 6;
    /// Numéro de maison, premier nombre
    pub const HAUSNRZAHL1: usize = 7;
    /// Numéro de maison, première lettre
    pub const HAUSNRBUCHSTABE1: usize = 8;
    /// Liaison entre les deux parties du numéro (« - », « / », ...)
    pub const HAUSNRVERBINDUNG1: usize = 9;
    /// Numéro de maison, second nombre
    pub const HAUSNRZAHL2: usize = 10;
    /// Numéro de maison, seconde lettre
    pub const HAUSNRBUCHSTABE2: usize = 11;
    /// Indicateur de plage de numéros
    pub const HAUSNRBEREICH: usize = 12;
    /// Adresse de parcelle (sans numéro de maison)
    pub const GNRADRESSE: usize = 13;
    /// Nom de ferme ou de lieu-dit
    pub const HOFNAME: usize = 14;
    /// Coordonnée est (Rechtswert)
    pub const RW: usize = 15;
    /// Coordonnée nord (Hochwert)
    pub const HW: usize = 16;
    /// Code EPSG du système source de RW/HW
    pub const EPSG: usize = 17;
    /// Provenance de l'adresse
    pub const QUELLADRESSE: usize = 18;
    /// Mode de détermination des coordonnées
    pub const BESTIMMUNGSART: usize = 19;

    /// Nombre minimal de colonnes attendu par enregistrement
    pub const MIN_FIELDS: usize = 20;
}

/// Un enregistrement d'ADRESSE.csv, champs décodés et normalisés
///
/// Les deux composantes de coordonnées ne sont présentes qu'ensemble :
/// si RW ou HW manque, `coord` vaut `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddressRecord {
    /// Clé d'adresse (jointure vers la table des parcelles)
    pub adrcd: String,
    /// Code commune
    pub gkz: String,
    /// Code localité
    pub okz: String,
    /// Code postal
    pub plz: String,
    /// Code rue
    pub skz: String,
    /// Numéro de maison, partie texte
    pub hausnr_text: String,
    /// Numéro de maison, premier nombre
    pub hausnr_zahl1: Option<i32>,
    /// Numéro de maison, première lettre
    pub hausnr_buchstabe1: String,
    /// Liaison entre les deux parties du numéro
    pub hausnr_verbindung1: String,
    /// Numéro de maison, second nombre
    pub hausnr_zahl2: Option<i32>,
    /// Numéro de maison, seconde lettre
    pub hausnr_buchstabe2: String,
    /// Indicateur de plage de numéros
    pub hausnr_bereich: String,
    /// Nom de ferme ou de lieu-dit
    pub hofname: String,
    /// Position dans le système source (RW, HW)
    pub coord: Option<Coord>,
    /// Code EPSG du système source, tel que lu
    pub epsg: String,
    /// Provenance de l'adresse
    pub quelladresse: String,
    /// Mode de détermination des coordonnées
    pub bestimmungsart: String,
    /// Ligne physique dans le fichier source (l'en-tête est la ligne 1)
    pub line: u64,
}

impl AddressRecord {
    /// Vrai si l'enregistrement porte une géométrie exploitable
    pub fn has_coord(&self) -> bool {
        self.coord.is_some()
    }
}

/// Référence cadastrale d'une adresse (jointure ADRCD → parcelle)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParcelRef {
    /// Code de la commune cadastrale (Katastralgemeinde)
    pub kgnr: String,
    /// Numéro de parcelle (Grundstücksnummer)
    pub gnr: String,
}
