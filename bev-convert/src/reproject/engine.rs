//! Transformateur adossé au moteur PROJ
//!
//! Ce module n'existe qu'avec la feature `reproject`. Les paires sont
//! toujours instanciées à partir de chaînes de définition complètes, jamais
//! par simple code registre côté source (voir `defs`).

use std::path::Path;

use anyhow::{Context, Result};
use geo::Coord;
use proj::{Proj, ProjBuilder};

use super::ReprojectError;

/// Paire (source, cible) instanciée dans le moteur
pub struct ProjTransform {
    proj: Proj,
    target_epsg: u32,
}

impl ProjTransform {
    /// Crée la paire depuis deux définitions explicites
    ///
    /// `proj_data` pointe vers les fichiers de ressources PROJ (grilles de
    /// datum) quand ils ne sont pas au chemin par défaut.
    pub fn new(
        src_def: &str,
        dst_def: &str,
        proj_data: Option<&Path>,
        target_epsg: u32,
    ) -> Result<Self> {
        let proj = match proj_data {
            Some(dir) => {
                let builder = ProjBuilder::new();
                builder
                    .set_search_paths(dir)
                    .with_context(|| format!("Failed to set PROJ search path: {}", dir.display()))?;
                builder.proj_known_crs(src_def, dst_def, None)
            }
            None => Proj::new_known_crs(src_def, dst_def, None),
        }
        .context(format!(
            "Failed to create projection pair ({} -> {})",
            src_def, dst_def
        ))?;

        Ok(Self { proj, target_epsg })
    }

    /// Transforme une coordonnée unique
    pub fn transform(&self, coord: Coord) -> Result<Coord, ReprojectError> {
        self.proj
            .convert((coord.x, coord.y))
            .map(|(x, y)| Coord { x, y })
            .map_err(|e| ReprojectError::Transform {
                target: self.target_epsg,
                reason: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reproject::defs;

    #[test]
    fn test_gk_east_to_austria_lambert() {
        // Centre de Vienne, M34 → Austria Lambert
        let transform = ProjTransform::new(
            defs::definition(31256).unwrap(),
            defs::definition(31287).unwrap(),
            None,
            31287,
        )
        .unwrap();

        let out = transform
            .transform(Coord {
                x: 2_950.0,
                y: 340_000.0,
            })
            .unwrap();
        assert!((620_000.0..632_000.0).contains(&out.x), "x = {}", out.x);
        assert!((476_000.0..489_000.0).contains(&out.y), "y = {}", out.y);
    }

    #[test]
    fn test_engine_agrees_with_pure_rust_path() {
        // Même datum des deux côtés : le moteur et le chemin Rust pur
        // doivent coïncider à quelques millimètres près
        let engine = ProjTransform::new(
            defs::definition(31256).unwrap(),
            defs::definition(31287).unwrap(),
            None,
            31287,
        )
        .unwrap();
        let lite = crate::reproject::lite::GkTransform::new(31256, 31287).unwrap();

        let input = Coord {
            x: -12_340.0,
            y: 325_678.9,
        };
        let from_engine = engine.transform(input).unwrap();
        let from_lite = lite.transform(input).unwrap();

        assert!((from_engine.x - from_lite.x).abs() < 0.01);
        assert!((from_engine.y - from_lite.y).abs() < 0.01);
    }

    #[test]
    fn test_registry_target_fallback() {
        // Cible hors table : résolue par code registre
        let transform =
            ProjTransform::new(defs::definition(31254).unwrap(), "EPSG:4326", None, 4326).unwrap();
        let out = transform
            .transform(Coord {
                x: 80_000.0,
                y: 236_500.0,
            })
            .unwrap();
        // Innsbruck approximativement
        assert!((out.x - 11.39).abs() < 0.1, "lon = {}", out.x);
        assert!((out.y - 47.27).abs() < 0.1, "lat = {}", out.y);
    }

    #[test]
    fn test_invalid_definition() {
        let result = ProjTransform::new("n'importe quoi", "EPSG:4326", None, 4326);
        assert!(result.is_err());
    }
}
