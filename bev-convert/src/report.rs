//! Rapport de conversion
//!
//! Collecte les compteurs de la passe et les restitue en fin de run :
//! résumé console systématique, export JSON optionnel.

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use serde::Serialize;

/// Statut global de la conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RunStatus {
    /// Toutes les lignes lues ont été écrites ou sautées proprement
    Success,
    /// Des lignes ont été écartées sur erreur, le reste a été écrit
    PartialSuccess,
}

/// Compteurs d'une passe de conversion
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Cible de la reprojection
    pub target_epsg: u32,
    /// Durée de la passe
    pub duration_secs: f64,
    /// Statut global
    pub status: RunStatus,

    /// Lignes lues dans ADRESSE.csv (en-tête exclu)
    pub lines_read: u64,
    /// Lignes écrites dans la table de sortie
    pub rows_written: u64,
    /// Lignes sans coordonnées, sautées sans erreur
    pub skipped_no_coord: u64,
    /// Lignes écartées sur erreur (parsing, reprojection, code inconnu)
    pub record_errors: u64,
    /// Clés répétées dans la table des parcelles
    pub parcel_duplicates: u64,
}

impl RunReport {
    /// Crée un rapport vide pour une cible
    pub fn new(target_epsg: u32) -> Self {
        Self {
            target_epsg,
            duration_secs: 0.0,
            status: RunStatus::Success,
            lines_read: 0,
            rows_written: 0,
            skipped_no_coord: 0,
            record_errors: 0,
            parcel_duplicates: 0,
        }
    }

    /// Enregistre une ligne lue
    pub fn record_line(&mut self) {
        self.lines_read += 1;
    }

    /// Enregistre une ligne écrite
    pub fn record_written(&mut self) {
        self.rows_written += 1;
    }

    /// Enregistre une ligne sans coordonnées
    pub fn record_skip(&mut self) {
        self.skipped_no_coord += 1;
    }

    /// Enregistre une ligne écartée sur erreur
    pub fn record_error(&mut self) {
        self.record_errors += 1;
    }

    /// Définit la durée de la passe
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration_secs = duration.as_secs_f64();
    }

    /// Arrête le statut final d'après les compteurs
    pub fn finalize(&mut self) {
        self.status = if self.record_errors > 0 {
            RunStatus::PartialSuccess
        } else {
            RunStatus::Success
        };
    }

    /// Affiche le rapport sur la console
    pub fn display(&self) {
        println!("\n{}", "=".repeat(60));
        println!("CONVERSION REPORT - EPSG:{}", self.target_epsg);
        println!("{}", "=".repeat(60));

        println!("\nStatus: {:?}", self.status);
        println!("Duration: {:.2}s", self.duration_secs);

        println!("\n--- COUNTS ---");
        println!("Lines read: {}", self.lines_read);
        println!("Rows written: {}", self.rows_written);
        println!("Skipped (no coordinates): {}", self.skipped_no_coord);
        println!("Record errors: {}", self.record_errors);
        println!("Duplicate parcel keys: {}", self.parcel_duplicates);

        println!("\n{}", "=".repeat(60));
    }

    /// Sauvegarde le rapport en JSON
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Affichage compact pour le résumé
    pub fn summary(&self) -> String {
        format!(
            "EPSG:{}: {} read, {} written, {} skipped, {} errors, {} duplicate parcels",
            self.target_epsg,
            self.lines_read,
            self.rows_written,
            self.skipped_no_coord,
            self.record_errors,
            self.parcel_duplicates
        )
    }
}
