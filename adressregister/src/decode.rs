//! Décodage des champs texte de l'extrait BEV
//!
//! Les extraits récents sont en UTF-8, les plus anciens en Windows-1252.
//! La validation UTF-8 passe par simdutf8 (SIMD) ; en cas d'échec le champ
//! est réinterprété en Windows-1252, ce qui ne peut pas échouer.

use std::borrow::Cow;

use encoding_rs::WINDOWS_1252;

/// Décode un champ brut en chaîne, avec espaces de tête et de queue retirés
///
/// Emprunte le tampon d'origine quand le champ est de l'UTF-8 déjà propre,
/// n'alloue que pour le trim ou la conversion d'encodage.
pub fn decode_field(raw: &[u8]) -> Cow<'_, str> {
    match simdutf8::basic::from_utf8(raw) {
        Ok(s) => {
            let trimmed = s.trim();
            if trimmed.len() == s.len() {
                Cow::Borrowed(s)
            } else {
                Cow::Owned(trimmed.to_string())
            }
        }
        Err(_) => {
            // Windows-1252 couvre tous les octets : pas d'échec possible
            let (decoded, _, _) = WINDOWS_1252.decode(raw);
            Cow::Owned(decoded.trim().to_string())
        }
    }
}

/// Variante possédante de [`decode_field`]
pub fn decode_field_owned(raw: &[u8]) -> String {
    decode_field(raw).into_owned()
}
