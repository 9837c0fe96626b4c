//! Localisation des tables d'un extrait BEV
//!
//! Un extrait est un répertoire plat de fichiers CSV. Quatre tables sont
//! obligatoires, la table des parcelles est optionnelle et son nom varie
//! selon le millésime de l'extrait.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use tracing::info;

/// Table des adresses
pub const ADRESSE_FILE: &str = "ADRESSE.csv";
/// Table des rues
pub const STRASSE_FILE: &str = "STRASSE.csv";
/// Table des localités
pub const ORTSCHAFT_FILE: &str = "ORTSCHAFT.csv";
/// Table des communes
pub const GEMEINDE_FILE: &str = "GEMEINDE.csv";

/// Noms connus de la table adresse-parcelle, dans l'ordre de préférence
pub const PARCEL_TABLES: &[&str] = &["PERSISTENTE_ADR_GST.csv", "ADRESSE_GST.csv"];

/// Chemins résolus des tables d'un extrait
#[derive(Debug, Clone)]
pub struct Dataset {
    pub adresse: PathBuf,
    pub strasse: PathBuf,
    pub ortschaft: PathBuf,
    pub gemeinde: PathBuf,
    /// `None` quand l'extrait ne contient aucune table de parcelles
    pub parzellen: Option<PathBuf>,
}

impl Dataset {
    /// Résout les tables d'un répertoire d'extrait
    ///
    /// Échoue dès la première table obligatoire absente, avant toute
    /// écriture. La table des parcelles est sondée sous ses noms connus.
    pub fn locate(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            bail!("Input directory not found: {}", dir.display());
        }

        let dataset = Self {
            adresse: required_table(dir, ADRESSE_FILE)?,
            strasse: required_table(dir, STRASSE_FILE)?,
            ortschaft: required_table(dir, ORTSCHAFT_FILE)?,
            gemeinde: required_table(dir, GEMEINDE_FILE)?,
            parzellen: probe_parcel_table(dir),
        };

        if dataset.parzellen.is_none() {
            info!("No parcel table in extract, KGNR/GNR columns will be empty");
        }

        Ok(dataset)
    }
}

fn required_table(dir: &Path, name: &str) -> Result<PathBuf> {
    let path = dir.join(name);
    if !path.is_file() {
        bail!("Required table not found: {}", path.display());
    }
    Ok(path)
}

/// Premier nom connu présent dans le répertoire, le cas échéant
fn probe_parcel_table(dir: &Path) -> Option<PathBuf> {
    for name in PARCEL_TABLES {
        let path = dir.join(name);
        if path.is_file() {
            info!("Parcel table: {}", path.display());
            return Some(path);
        }
    }
    None
}
