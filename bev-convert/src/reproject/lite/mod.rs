//! Reprojection en Rust pur (sans moteur externe)
//!
//! Couvre les systèmes sources des extraits BEV :
//! - MGI / Gauss-Krüger M28 (EPSG:31254) - Vorarlberg, Tyrol
//! - MGI / Gauss-Krüger M31 (EPSG:31255) - Autriche centrale
//! - MGI / Gauss-Krüger M34 (EPSG:31256) - Autriche orientale
//!
//! Cibles supportées :
//! - MGI / Austria Lambert (EPSG:31287) - même datum, pas de Helmert
//! - WGS84 (EPSG:4326)
//! - Web Mercator (EPSG:3857)
//!
//! Toute autre paire passe par le moteur PROJ (feature `reproject`).

mod ellipsoid;
mod gauss_krueger;
mod helmert;
mod lambert;
mod mercator;

use anyhow::{bail, Result};
use geo::Coord;

use super::ReprojectError;

/// Point en coordonnées géographiques (radians)
#[derive(Debug, Clone, Copy)]
pub struct Geographic {
    /// Longitude en radians
    pub lon: f64,
    /// Latitude en radians
    pub lat: f64,
}

impl Geographic {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Convertit en degrés
    pub fn to_degrees(self) -> (f64, f64) {
        (self.lon.to_degrees(), self.lat.to_degrees())
    }

    /// Crée depuis des degrés
    pub fn from_degrees(lon_deg: f64, lat_deg: f64) -> Self {
        Self {
            lon: lon_deg.to_radians(),
            lat: lat_deg.to_radians(),
        }
    }
}

/// Méridien central d'une zone Gauss-Krüger autrichienne (degrés)
fn central_meridian(source_epsg: u32) -> Option<f64> {
    match source_epsg {
        31254 => Some(10.0 + 20.0 / 60.0), // M28
        31255 => Some(13.0 + 20.0 / 60.0), // M31
        31256 => Some(16.0 + 20.0 / 60.0), // M34
        _ => None,
    }
}

fn is_supported_target(target_epsg: u32) -> bool {
    matches!(target_epsg, 31287 | 4326 | 3857)
}

/// Vrai si la paire (source, cible) est couverte sans moteur externe
pub fn supports(source_epsg: u32, target_epsg: u32) -> bool {
    central_meridian(source_epsg).is_some() && is_supported_target(target_epsg)
}

/// Transformation Gauss-Krüger → cible, figée pour une zone source
pub struct GkTransform {
    /// Méridien central de la zone (radians)
    lon0: f64,
    target_epsg: u32,
}

impl GkTransform {
    pub fn new(source_epsg: u32, target_epsg: u32) -> Result<Self> {
        let Some(lon0_deg) = central_meridian(source_epsg) else {
            bail!(
                "EPSG:{} n'est pas une zone Gauss-Krüger autrichienne (31254, 31255, 31256)",
                source_epsg
            );
        };
        if !is_supported_target(target_epsg) {
            bail!(
                "EPSG:{} non couvert par le chemin Rust pur. Cibles supportées: 31287, 4326, 3857",
                target_epsg
            );
        }
        Ok(Self {
            lon0: lon0_deg.to_radians(),
            target_epsg,
        })
    }

    /// Transforme un point de la zone source vers la cible
    pub fn transform(&self, coord: Coord) -> Result<Coord, ReprojectError> {
        if !coord.x.is_finite() || !coord.y.is_finite() {
            return Err(ReprojectError::Transform {
                target: self.target_epsg,
                reason: "coordinate is not finite".into(),
            });
        }

        // Étape 1 : plan Gauss-Krüger → géographique sur le datum MGI
        let geo_mgi = gauss_krueger::gk_to_geographic(coord.x, coord.y, self.lon0);

        // Étape 2 : géographique → cible
        let (x, y) = match self.target_epsg {
            // Même datum que la source : projection directe
            31287 => lambert::geographic_to_austria_lambert(geo_mgi),
            4326 => helmert::mgi_to_wgs84(geo_mgi).to_degrees(),
            3857 => mercator::geographic_to_web_mercator(helmert::mgi_to_wgs84(geo_mgi)),
            other => {
                return Err(ReprojectError::Transform {
                    target: other,
                    reason: "target not covered by the pure-Rust path".into(),
                })
            }
        };
        Ok(Coord { x, y })
    }
}
