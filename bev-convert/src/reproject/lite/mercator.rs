//! Projection Web Mercator (EPSG:3857)
//!
//! Modèle sphérique sur le rayon équatorial WGS84, tel qu'employé par les
//! fonds de carte web.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use super::ellipsoid::WGS84;
use super::Geographic;

/// Convertit un point géographique WGS84 vers Web Mercator
pub fn geographic_to_web_mercator(geo: Geographic) -> (f64, f64) {
    let r = WGS84::A;

    // Latitude bornée pour éviter l'infini aux pôles
    let lat = geo.lat.clamp(-85.0_f64.to_radians(), 85.0_f64.to_radians());

    let x = r * geo.lon;
    let y = r * (FRAC_PI_4 + lat / 2.0).tan().ln();
    (x, y)
}

/// Convertit Web Mercator vers géographique WGS84
#[allow(dead_code)]
pub fn web_mercator_to_geographic(x: f64, y: f64) -> Geographic {
    let r = WGS84::A;

    let lon = x / r;
    let lat = 2.0 * (y / r).exp().atan() - FRAC_PI_2;
    Geographic::new(lon, lat)
}
