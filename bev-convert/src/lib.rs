//! # bev-convert
//!
//! Conversion de l'extrait d'adresses du BEV (« Adresse Relationale
//! Tabellen ») en une table CSV unique : jointure des tables de
//! référence et reprojection des coordonnées vers un CRS cible.
//!
//! ## Features
//!
//! - Jointure en flux : seules les tables de référence tiennent en mémoire
//! - Reprojection Gauss-Krüger (EPSG:31254/31255/31256) vers Austria
//!   Lambert, WGS84 ou Web Mercator en Rust pur, PROJ pour le reste
//! - Erreurs localisées par enregistrement, comptées sans arrêter la passe
//! - Rapport de conversion (texte et JSON)
//!
//! ## Usage CLI
//!
//! ```bash
//! # Conversion vers EPSG:31287 (défaut)
//! bev-convert --input ./Adresse_Relationale_Tabellen/
//!
//! # WGS84, quatre décimales, rapport JSON
//! bev-convert --input ./extract/ --target 4326 --decimals 4 --report run.json
//! ```

pub mod dataset;
pub mod pipeline;
pub mod report;
pub mod reproject;
pub mod writer;

pub use dataset::Dataset;
pub use pipeline::ReferenceData;
pub use report::{RunReport, RunStatus};
pub use reproject::{CoordReproject, ReprojectError, ReprojectorSet};
pub use writer::{OutputRecord, OutputWriter};
