//! Lecture en flux d'ADRESSE.csv
//!
//! La table d'adresses fait plusieurs millions de lignes : elle est lue
//! enregistrement par enregistrement, sans jamais être matérialisée. La
//! première ligne est l'en-tête ; une ligne composée uniquement d'espaces
//! marque la fin des données (les lignes entièrement vides sont absorbées
//! par la couche CSV). Un enregistrement illisible produit une erreur
//! localisée sans interrompre le flux.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ByteRecord, ReaderBuilder};
use geo::Coord;

use crate::decode::{decode_field, decode_field_owned};
use crate::error::AdressError;
use crate::types::{columns, AddressRecord};

/// Configuration CSV commune aux tables BEV : « ; » comme séparateur,
/// en-tête en première ligne, largeur de ligne variable tolérée
pub(crate) fn table_reader() -> ReaderBuilder {
    let mut builder = ReaderBuilder::new();
    builder.delimiter(b';');
    builder.has_headers(true);
    builder.flexible(true);
    builder
}

/// Vrai si l'enregistrement ne contient que des espaces (fin des données)
pub(crate) fn is_blank_record(record: &ByteRecord) -> bool {
    record
        .iter()
        .all(|field| field.iter().all(|b| b.is_ascii_whitespace()))
}

/// Lecteur en flux de la table d'adresses
#[derive(Debug)]
pub struct AddressReader<R: Read> {
    reader: csv::Reader<R>,
    record: ByteRecord,
    done: bool,
}

impl AddressReader<File> {
    /// Ouvre ADRESSE.csv ; échoue immédiatement si le fichier manque
    pub fn from_path(path: &Path) -> Result<Self, AdressError> {
        if !path.is_file() {
            return Err(AdressError::MissingFile(path.display().to_string()));
        }
        Ok(Self::new(table_reader().from_path(path)?))
    }
}

impl<R: Read> AddressReader<R> {
    /// Lit la table depuis une source arbitraire (tests, flux en mémoire)
    pub fn from_reader(source: R) -> Self {
        Self::new(table_reader().from_reader(source))
    }

    fn new(reader: csv::Reader<R>) -> Self {
        Self {
            reader,
            record: ByteRecord::new(),
            done: false,
        }
    }

    /// Enregistrement suivant
    ///
    /// `None` en fin de flux (EOF ou ligne blanche terminale). Une erreur
    /// de parsing est renvoyée à l'appelant mais ne clôt pas le flux ;
    /// une erreur CSV ou I/O le clôt définitivement.
    pub fn next_record(&mut self) -> Option<Result<AddressRecord, AdressError>> {
        if self.done {
            return None;
        }
        match self.reader.read_byte_record(&mut self.record) {
            Ok(false) => {
                self.done = true;
                None
            }
            Ok(true) => {
                if is_blank_record(&self.record) {
                    self.done = true;
                    return None;
                }
                let line = self.record.position().map(|p| p.line()).unwrap_or(0);
                Some(parse_record(&self.record, line))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e.into()))
            }
        }
    }
}

/// Interprète un enregistrement brut d'ADRESSE.csv
fn parse_record(record: &ByteRecord, line: u64) -> Result<AddressRecord, AdressError> {
    if record.len() < columns::MIN_FIELDS {
        return Err(AdressError::parse_error(
            line,
            format!(
                "expected at least {} fields, got {}",
                columns::MIN_FIELDS,
                record.len()
            ),
        ));
    }

    let text = |idx: usize| decode_field_owned(record.get(idx).unwrap_or(b""));

    let rw = opt_f64(record, columns::RW, line, "RW")?;
    let hw = opt_f64(record, columns::HW, line, "HW")?;
    // Une composante manquante invalide la paire entière
    let coord = match (rw, hw) {
        (Some(x), Some(y)) => Some(Coord { x, y }),
        _ => None,
    };

    Ok(AddressRecord {
        adrcd: text(columns::ADRCD),
        gkz: text(columns::GKZ),
        okz: text(columns::OKZ),
        plz: text(columns::PLZ),
        skz: text(columns::SKZ),
        hausnr_text: text(columns::HAUSNRTEXT),
        hausnr_zahl1: opt_i32(record, columns::HAUSNRZAHL1, line, "HAUSNRZAHL1")?,
        hausnr_buchstabe1: text(columns::HAUSNRBUCHSTABE1),
        hausnr_verbindung1: text(columns::HAUSNRVERBINDUNG1),
        hausnr_zahl2: opt_i32(record, columns::HAUSNRZAHL2, line, "HAUSNRZAHL2")?,
        hausnr_buchstabe2: text(columns::HAUSNRBUCHSTABE2),
        hausnr_bereich: text(columns::HAUSNRBEREICH),
        hofname: text(columns::HOFNAME),
        coord,
        epsg: text(columns::EPSG),
        quelladresse: text(columns::QUELLADRESSE),
        bestimmungsart: text(columns::BESTIMMUNGSART),
        line,
    })
}

/// Champ entier optionnel : vide → `None`, invalide → erreur localisée
fn opt_i32(
    record: &ByteRecord,
    idx: usize,
    line: u64,
    name: &str,
) -> Result<Option<i32>, AdressError> {
    let raw = decode_field(record.get(idx).unwrap_or(b""));
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<i32>()
        .map(Some)
        .map_err(|_| AdressError::parse_error(line, format!("{name}: invalid integer {raw:?}")))
}

/// Champ flottant optionnel, parsé via fast-float
fn opt_f64(
    record: &ByteRecord,
    idx: usize,
    line: u64,
    name: &str,
) -> Result<Option<f64>, AdressError> {
    let raw = decode_field(record.get(idx).unwrap_or(b""));
    if raw.is_empty() {
        return Ok(None);
    }
    fast_float::parse::<f64, _>(raw.as_ref())
        .map(Some)
        .map_err(|_| AdressError::parse_error(line, format!("{name}: invalid number {raw:?}")))
}
