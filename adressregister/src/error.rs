//! Types d'erreurs pour le crate adressregister

use thiserror::Error;

/// Erreurs pouvant survenir lors de la lecture des tables de l'extrait BEV
#[derive(Debug, Error)]
pub enum AdressError {
    /// Erreur d'I/O lors de la lecture d'une table
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Fichier requis introuvable
    #[error("missing required file: {0}")]
    MissingFile(String),

    /// Erreur CSV bas niveau (quoting cassé, flux illisible)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Un enregistrement isolé n'a pas pu être interprété
    #[error("parse error at line {line}: {reason}")]
    ParseError { line: u64, reason: String },
}

impl AdressError {
    /// Crée une erreur de parsing avec le numéro de ligne
    pub fn parse_error(line: u64, reason: impl Into<String>) -> Self {
        Self::ParseError {
            line,
            reason: reason.into(),
        }
    }

    /// Vrai pour les erreurs limitées à un enregistrement ; le flux peut continuer après elles
    pub fn is_record_scoped(&self) -> bool {
        matches!(self, Self::ParseError { .. })
    }
}
