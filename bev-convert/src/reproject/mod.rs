//! Reprojection des coordonnées d'adresse
//!
//! Un transformateur par système source (colonne EPSG d'ADRESSE.csv), une
//! cible unique fixée pour toute la passe. Les systèmes MGI historiques
//! sont toujours instanciés à partir de paramètres explicites, jamais par
//! code registre, leurs définitions de datum par défaut étant fausses
//! (voir `defs`). La cible, elle, peut retomber sur le registre.
//!
//! Le chemin Rust pur couvre les paires courantes du domaine ; le moteur
//! PROJ (feature `reproject`, activée par défaut) prend le relais pour
//! toute autre cible.

mod defs;
#[cfg(feature = "reproject")]
mod engine;
mod lite;

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use geo::Coord;
use thiserror::Error;
#[cfg(feature = "reproject")]
use tracing::debug;

/// Erreurs de reprojection au niveau d'un enregistrement
///
/// Elles ne condamnent jamais la passe : l'appelant compte l'échec et
/// continue. Les échecs d'initialisation, eux, sont fatals et passent
/// par `anyhow`.
#[derive(Debug, Error)]
pub enum ReprojectError {
    /// Code source absent de la table des transformateurs
    #[error("unknown source CRS code: {0:?}")]
    UnknownSource(String),

    /// Le moteur a refusé la transformation du point
    #[error("transform to EPSG:{target} failed: {reason}")]
    Transform { target: u32, reason: String },
}

/// Contrat de reprojection d'un point, sélectionné par code source
pub trait CoordReproject {
    fn reproject(&self, source_epsg: &str, coord: Coord) -> Result<Coord, ReprojectError>;
}

/// Chemin de transformation retenu pour un système source
enum Transformer {
    /// La source est déjà exprimée dans la cible
    Identity,
    /// Chemin Rust pur (zones Gauss-Krüger autrichiennes)
    Lite(lite::GkTransform),
    /// Moteur PROJ
    #[cfg(feature = "reproject")]
    Proj(engine::ProjTransform),
}

impl Transformer {
    fn transform(&self, coord: Coord) -> Result<Coord, ReprojectError> {
        match self {
            Self::Identity => Ok(coord),
            Self::Lite(t) => t.transform(coord),
            #[cfg(feature = "reproject")]
            Self::Proj(t) => t.transform(coord),
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::Lite(_) => "lite (pure Rust)",
            #[cfg(feature = "reproject")]
            Self::Proj(_) => "proj (PROJ engine)",
        }
    }
}

/// Jeu de transformateurs pré-initialisés pour une passe complète
///
/// Les paires dont les définitions résolues sont identiques partagent le
/// même handle (`Arc`) ; chaque handle est créé et libéré exactement une
/// fois, à la construction et à la destruction du jeu.
pub struct ReprojectorSet {
    target_epsg: u32,
    transformers: HashMap<String, Arc<Transformer>>,
}

impl ReprojectorSet {
    /// Initialise un transformateur par source connue vers `target_epsg`
    ///
    /// Échoue immédiatement, avant toute sortie, si la cible ne peut pas
    /// être instanciée.
    pub fn for_target(target_epsg: u32, proj_data: Option<&Path>) -> Result<Self> {
        let mut transformers = HashMap::new();
        let mut interned: HashMap<(String, String), Arc<Transformer>> = HashMap::new();

        for &source in defs::SOURCE_CODES {
            let transformer = build_transformer(source, target_epsg, proj_data, &mut interned)
                .with_context(|| {
                    format!("Failed to initialize EPSG:{source} -> EPSG:{target_epsg}")
                })?;
            transformers.insert(source.to_string(), transformer);
        }

        // Un enregistrement déjà exprimé dans la cible passe tel quel
        transformers
            .entry(target_epsg.to_string())
            .or_insert_with(|| Arc::new(Transformer::Identity));

        Ok(Self {
            target_epsg,
            transformers,
        })
    }

    /// Code EPSG de la cible de la passe
    pub fn target_epsg(&self) -> u32 {
        self.target_epsg
    }

    /// Chemins retenus, pour le diagnostic au démarrage
    pub fn description(&self) -> String {
        let mut parts: Vec<String> = self
            .transformers
            .iter()
            .map(|(code, transformer)| format!("{} -> {}", code, transformer.label()))
            .collect();
        parts.sort();
        parts.join(", ")
    }
}

impl CoordReproject for ReprojectorSet {
    fn reproject(&self, source_epsg: &str, coord: Coord) -> Result<Coord, ReprojectError> {
        let transformer = self
            .transformers
            .get(source_epsg)
            .ok_or_else(|| ReprojectError::UnknownSource(source_epsg.to_string()))?;
        transformer.transform(coord)
    }
}

/// Choisit le chemin de transformation d'une source vers la cible
fn build_transformer(
    source: u32,
    target: u32,
    proj_data: Option<&Path>,
    interned: &mut HashMap<(String, String), Arc<Transformer>>,
) -> Result<Arc<Transformer>> {
    if source == target {
        return Ok(Arc::new(Transformer::Identity));
    }
    if lite::supports(source, target) {
        return Ok(Arc::new(Transformer::Lite(lite::GkTransform::new(
            source, target,
        )?)));
    }

    #[cfg(feature = "reproject")]
    {
        proj_transformer(source, target, proj_data, interned)
    }

    #[cfg(not(feature = "reproject"))]
    {
        let _ = (proj_data, interned);
        anyhow::bail!(
            "EPSG:{} -> EPSG:{} requires the 'reproject' feature. \
             Without it, sources 31254/31255/31256 only reach 31287, 4326 or 3857. \
             Build with: cargo build --features reproject",
            source,
            target
        )
    }
}

/// Instancie (ou réutilise) une paire dans le moteur PROJ
#[cfg(feature = "reproject")]
fn proj_transformer(
    source: u32,
    target: u32,
    proj_data: Option<&Path>,
    interned: &mut HashMap<(String, String), Arc<Transformer>>,
) -> Result<Arc<Transformer>> {
    let src_def = defs::definition(source)
        .ok_or_else(|| anyhow::anyhow!("No pinned definition for source EPSG:{source}"))?
        .to_string();
    // La cible peut venir du registre ; les sources MGI jamais
    let dst_def = match defs::definition(target) {
        Some(def) => def.to_string(),
        None => format!("EPSG:{target}"),
    };

    // Définitions résolues identiques : rien à transformer
    if src_def == dst_def {
        return Ok(Arc::new(Transformer::Identity));
    }

    let key = (src_def, dst_def);
    if let Some(shared) = interned.get(&key) {
        debug!(source, target, "Reusing interned projection handle");
        return Ok(Arc::clone(shared));
    }

    let transformer = Arc::new(Transformer::Proj(engine::ProjTransform::new(
        &key.0,
        &key.1,
        proj_data,
        target,
    )?));
    interned.insert(key, Arc::clone(&transformer));
    Ok(transformer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_target_uses_pure_rust_path() {
        let set = ReprojectorSet::for_target(31287, None).unwrap();
        assert_eq!(set.target_epsg(), 31287);

        let description = set.description();
        assert!(description.contains("31254 -> lite"), "{description}");
        assert!(description.contains("31255 -> lite"), "{description}");
        assert!(description.contains("31256 -> lite"), "{description}");
        assert!(description.contains("31287 -> identity"), "{description}");
    }

    #[test]
    fn test_reproject_vienna_to_lambert() {
        let set = ReprojectorSet::for_target(31287, None).unwrap();
        let out = set
            .reproject(
                "31256",
                Coord {
                    x: 2_950.0,
                    y: 340_000.0,
                },
            )
            .unwrap();
        assert!((620_000.0..632_000.0).contains(&out.x), "x = {}", out.x);
        assert!((476_000.0..489_000.0).contains(&out.y), "y = {}", out.y);
    }

    #[test]
    fn test_record_already_in_target_passes_through() {
        let set = ReprojectorSet::for_target(31287, None).unwrap();
        let input = Coord {
            x: 625_000.0,
            y: 482_000.0,
        };
        let out = set.reproject("31287", input).unwrap();
        assert_eq!(out, input);
    }

    #[test]
    fn test_unknown_source_code() {
        let set = ReprojectorSet::for_target(31287, None).unwrap();
        let err = set
            .reproject("99999", Coord { x: 0.0, y: 0.0 })
            .unwrap_err();
        assert!(matches!(err, ReprojectError::UnknownSource(_)));
        assert!(err.to_string().contains("99999"));
    }

    #[test]
    fn test_source_as_target_is_identity() {
        // Cible 31256 : la source homonyme passe telle quelle, les autres
        // zones passent par le moteur (ou échouent sans lui)
        let set = ReprojectorSet::for_target(31256, None);
        #[cfg(feature = "reproject")]
        {
            let set = set.unwrap();
            let input = Coord {
                x: 2_950.0,
                y: 340_000.0,
            };
            assert_eq!(set.reproject("31256", input).unwrap(), input);
        }
        #[cfg(not(feature = "reproject"))]
        assert!(set.is_err());
    }

    #[test]
    fn test_wgs84_target_without_engine() {
        // 4326 est couvert par le chemin Rust pur, feature ou non
        let set = ReprojectorSet::for_target(4326, None).unwrap();
        let out = set
            .reproject(
                "31254",
                Coord {
                    x: 80_000.0,
                    y: 236_500.0,
                },
            )
            .unwrap();
        assert!((out.x - 11.39).abs() < 0.1, "lon = {}", out.x);
        assert!((out.y - 47.27).abs() < 0.1, "lat = {}", out.y);
    }
}
