//! Chargement des tables de référence (rue, localité, commune, parcelle)
//!
//! Ces tables sont petites devant ADRESSE.csv : elles sont matérialisées
//! en mémoire avant la passe principale. En cas de clé répétée, la première
//! occurrence gagne ; les suivantes sont ignorées.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::Path;

use csv::ByteRecord;
use tracing::debug;

use crate::decode::decode_field;
use crate::error::AdressError;
use crate::reader::{is_blank_record, table_reader};
use crate::types::ParcelRef;

/// Charge une table code → nom (STRASSE, ORTSCHAFT, GEMEINDE)
///
/// `key_col` et `value_col` désignent les colonnes à retenir ; les lignes
/// sans clé sont ignorées, une valeur absente devient la chaîne vide.
/// Le fichier doit exister : son absence est une erreur fatale pour la passe.
pub fn load_name_map(
    path: &Path,
    key_col: usize,
    value_col: usize,
) -> Result<HashMap<String, String>, AdressError> {
    if !path.is_file() {
        return Err(AdressError::MissingFile(path.display().to_string()));
    }

    let mut reader = table_reader().from_path(path)?;
    let mut record = ByteRecord::new();
    let mut map = HashMap::new();

    while reader.read_byte_record(&mut record)? {
        if is_blank_record(&record) {
            break;
        }
        let key = decode_field(record.get(key_col).unwrap_or(b""));
        if key.is_empty() {
            continue;
        }
        if !map.contains_key(key.as_ref()) {
            let value = decode_field(record.get(value_col).unwrap_or(b"")).into_owned();
            map.insert(key.into_owned(), value);
        }
    }

    debug!(path = %path.display(), entries = map.len(), "Reference table loaded");
    Ok(map)
}

/// Jointure ADRCD → référence de parcelle, avec comptage des doublons
#[derive(Debug, Default)]
pub struct ParcelMap {
    map: HashMap<String, ParcelRef>,
    /// Nombre de clés rencontrées plus d'une fois (occurrences au-delà de la première)
    pub duplicates: u64,
}

impl ParcelMap {
    /// Référence de parcelle pour une clé d'adresse
    pub fn get(&self, adrcd: &str) -> Option<&ParcelRef> {
        self.map.get(adrcd)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Charge la table adresse → parcelle (colonnes ADRCD, KGNR, GNR)
///
/// Chaque clé répétée au-delà de sa première occurrence incrémente
/// `duplicates`, sans remplacer l'entrée retenue.
pub fn load_parcel_map(path: &Path) -> Result<ParcelMap, AdressError> {
    const ADRCD: usize = 0;
    const KGNR: usize = 1;
    const GNR: usize = 2;

    if !path.is_file() {
        return Err(AdressError::MissingFile(path.display().to_string()));
    }

    let mut reader = table_reader().from_path(path)?;
    let mut record = ByteRecord::new();
    let mut parcels = ParcelMap::default();

    while reader.read_byte_record(&mut record)? {
        if is_blank_record(&record) {
            break;
        }
        let key = decode_field(record.get(ADRCD).unwrap_or(b""));
        if key.is_empty() {
            continue;
        }
        match parcels.map.entry(key.into_owned()) {
            Entry::Occupied(_) => parcels.duplicates += 1,
            Entry::Vacant(slot) => {
                slot.insert(ParcelRef {
                    kgnr: decode_field(record.get(KGNR).unwrap_or(b"")).into_owned(),
                    gnr: decode_field(record.get(GNR).unwrap_or(b"")).into_owned(),
                });
            }
        }
    }

    debug!(
        path = %path.display(),
        entries = parcels.len(),
        duplicates = parcels.duplicates,
        "Parcel table loaded"
    );
    Ok(parcels)
}
