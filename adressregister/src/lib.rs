//! # adressregister
//!
//! Lecture du registre d'adresses autrichien, tel que publié par le BEV
//! (extraits « Adresse-GWR Online » : ADRESSE.csv et ses tables de
//! référence, délimitées par « ; »).
//!
//! ## Features
//!
//! - Lecture en flux d'ADRESSE.csv, à mémoire constante
//! - Décodage UTF-8 (SIMD) avec repli Windows-1252 pour les vieux extraits
//! - Tables de référence code → nom et adresse → parcelle
//! - Assemblage du numéro de maison affichable (HAUSNUMMER)
//! - Erreurs localisées par enregistrement, le flux continue après elles
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::path::Path;
//! use adressregister::AddressReader;
//!
//! let mut reader = AddressReader::from_path(Path::new("ADRESSE.csv"))?;
//! while let Some(next) = reader.next_record() {
//!     let record = next?;
//!     println!("{} EPSG:{} {:?}", record.adrcd, record.epsg, record.coord);
//! }
//! ```

pub mod decode;
pub mod error;
pub mod hausnummer;
pub mod lookup;
pub mod reader;
pub mod types;

pub use error::AdressError;
pub use hausnummer::assemble_hausnummer;
pub use lookup::{load_name_map, load_parcel_map, ParcelMap};
pub use reader::AddressReader;
pub use types::{AddressRecord, ParcelRef};
