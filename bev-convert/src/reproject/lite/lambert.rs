//! Projection MGI / Austria Lambert (EPSG:31287)
//!
//! Lambert conforme conique à deux parallèles sur Bessel 1841. La cible
//! partage le datum des zones Gauss-Krüger sources : aucun passage par
//! WGS84 n'est nécessaire.

use std::f64::consts::FRAC_PI_4;

use super::ellipsoid::Bessel1841;
use super::Geographic;

/// Paramètres EPSG:31287 (en radians / mètres)
struct AustriaLambert {
    lon0: f64,
    lat0: f64,
    lat1: f64,
    lat2: f64,
    x0: f64,
    y0: f64,
}

impl AustriaLambert {
    fn params() -> Self {
        Self {
            lon0: (13.0 + 20.0 / 60.0_f64).to_radians(), // 13°20' E
            lat0: 47.5_f64.to_radians(),
            lat1: 49.0_f64.to_radians(),
            lat2: 46.0_f64.to_radians(),
            x0: 400_000.0,
            y0: 400_000.0,
        }
    }
}

/// Latitude isométrique sur l'ellipsoïde
fn isometric_latitude(lat: f64, e: f64) -> f64 {
    let sin_lat = lat.sin();
    let correction = ((1.0 - e * sin_lat) / (1.0 + e * sin_lat)).powf(e / 2.0);
    ((FRAC_PI_4 + lat / 2.0).tan() * correction).ln()
}

/// Grande normale (rayon de courbure dans le premier vertical)
fn grande_normale(lat: f64, a: f64, e2: f64) -> f64 {
    a / (1.0 - e2 * lat.sin().powi(2)).sqrt()
}

/// Projette un point géographique MGI vers Austria Lambert
pub fn geographic_to_austria_lambert(geo: Geographic) -> (f64, f64) {
    let params = AustriaLambert::params();
    let a = Bessel1841::A;
    let e = Bessel1841::E;
    let e2 = Bessel1841::E2;

    let n1 = grande_normale(params.lat1, a, e2);
    let n2 = grande_normale(params.lat2, a, e2);

    let iso_lat1 = isometric_latitude(params.lat1, e);
    let iso_lat2 = isometric_latitude(params.lat2, e);
    let iso_lat0 = isometric_latitude(params.lat0, e);

    // Exposant et constante du cône, rayon du parallèle d'origine
    let n = ((n1 * params.lat1.cos()).ln() - (n2 * params.lat2.cos()).ln()) / (iso_lat2 - iso_lat1);
    let c = (n1 * params.lat1.cos() / n) * (n * iso_lat1).exp();
    let r0 = c * (-n * iso_lat0).exp();

    let r = c * (-n * isometric_latitude(geo.lat, e)).exp();
    let gamma = n * (geo.lon - params.lon0);

    let x = params.x0 + r * gamma.sin();
    let y = params.y0 + r0 - r * gamma.cos();
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_maps_to_false_origin() {
        // Le point d'origine (13°20' E, 47.5° N) tombe exactement sur (400 000, 400 000)
        let origin = Geographic::from_degrees(13.0 + 20.0 / 60.0, 47.5);
        let (x, y) = geographic_to_austria_lambert(origin);
        assert!((x - 400_000.0).abs() < 1e-6, "x = {x}");
        assert!((y - 400_000.0).abs() < 1e-6, "y = {y}");
    }

    #[test]
    fn test_vienna() {
        let vienna = Geographic::from_degrees(16.373, 48.2);
        let (x, y) = geographic_to_austria_lambert(vienna);
        assert!((620_000.0..632_000.0).contains(&x), "x = {x}");
        assert!((476_000.0..489_000.0).contains(&y), "y = {y}");
    }

    #[test]
    fn test_north_increases_with_latitude() {
        let south = geographic_to_austria_lambert(Geographic::from_degrees(14.0, 46.8));
        let north = geographic_to_austria_lambert(Geographic::from_degrees(14.0, 48.4));
        assert!(north.1 > south.1);
    }

    #[test]
    fn test_east_increases_with_longitude() {
        let west = geographic_to_austria_lambert(Geographic::from_degrees(10.5, 47.2));
        let east = geographic_to_austria_lambert(Geographic::from_degrees(16.5, 47.2));
        assert!(west.0 < 400_000.0);
        assert!(east.0 > 400_000.0);
        assert!(west.0 < east.0);
    }
}
