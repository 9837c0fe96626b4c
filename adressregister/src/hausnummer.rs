//! Assemblage du numéro de maison (HAUSNUMMER)
//!
//! Le numéro affichable se compose de six sous-champs d'ADRESSE.csv, émis
//! dans l'ordre du dictionnaire BEV : HAUSNRTEXT, HAUSNRZAHL1,
//! HAUSNRBUCHSTABE1, HAUSNRVERBINDUNG1, HAUSNRZAHL2, HAUSNRBUCHSTABE2.
//! Les sous-champs vides sont omis, les restants séparés par une espace
//! simple, sans séparateur en tête, en queue ou doublé.

use crate::types::AddressRecord;

/// Assemble le numéro de maison affichable d'un enregistrement
///
/// Fonction pure : ne dépend que des sous-champs du numéro, sans I/O ni
/// consultation des tables de référence.
pub fn assemble_hausnummer(record: &AddressRecord) -> String {
    let mut out = String::new();
    push_text(&mut out, &record.hausnr_text);
    push_number(&mut out, record.hausnr_zahl1);
    push_text(&mut out, &record.hausnr_buchstabe1);
    push_text(&mut out, &record.hausnr_verbindung1);
    push_number(&mut out, record.hausnr_zahl2);
    push_text(&mut out, &record.hausnr_buchstabe2);
    out
}

fn push_text(out: &mut String, token: &str) {
    let token = token.trim();
    if token.is_empty() {
        return;
    }
    if !out.is_empty() {
        out.push(' ');
    }
    out.push_str(token);
}

fn push_number(out: &mut String, value: Option<i32>) {
    if let Some(value) = value {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(&value.to_string());
    }
}
