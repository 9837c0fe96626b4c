//! Passage de datum MGI → WGS84 (Helmert à 7 paramètres)
//!
//! Paramètres officiels du BEV, convention « position vector » : les mêmes
//! valeurs que le +towgs84 épinglé dans les définitions proj. Le point passe
//! en coordonnées géocentriques sur Bessel (h = 0), subit la similitude,
//! puis revient en géographique sur WGS84.

use super::ellipsoid::{Bessel1841, WGS84};
use super::Geographic;

// towgs84 = 577.326,90.129,463.919,5.137,1.474,5.297,2.4232
const DX: f64 = 577.326;
const DY: f64 = 90.129;
const DZ: f64 = 463.919;
const RX_SEC: f64 = 5.137;
const RY_SEC: f64 = 1.474;
const RZ_SEC: f64 = 5.297;
const SCALE_PPM: f64 = 2.4232;

const SEC_TO_RAD: f64 = std::f64::consts::PI / (180.0 * 3600.0);

/// Transforme un point géographique du datum MGI vers WGS84
pub fn mgi_to_wgs84(geo: Geographic) -> Geographic {
    let (x, y, z) = geodetic_to_geocentric(geo, Bessel1841::A, Bessel1841::E2);

    let rx = RX_SEC * SEC_TO_RAD;
    let ry = RY_SEC * SEC_TO_RAD;
    let rz = RZ_SEC * SEC_TO_RAD;
    let m = 1.0 + SCALE_PPM * 1e-6;

    // Similitude 7 paramètres, convention position vector
    let xw = DX + m * (x - rz * y + ry * z);
    let yw = DY + m * (rz * x + y - rx * z);
    let zw = DZ + m * (-ry * x + rx * y + z);

    geocentric_to_geodetic(xw, yw, zw, WGS84::A, WGS84::E2)
}

/// Géographique (h = 0) → géocentrique cartésien
fn geodetic_to_geocentric(geo: Geographic, a: f64, e2: f64) -> (f64, f64, f64) {
    let sin_lat = geo.lat.sin();
    let cos_lat = geo.lat.cos();
    let n = a / (1.0 - e2 * sin_lat * sin_lat).sqrt();

    let x = n * cos_lat * geo.lon.cos();
    let y = n * cos_lat * geo.lon.sin();
    let z = n * (1.0 - e2) * sin_lat;
    (x, y, z)
}

/// Géocentrique cartésien → géographique (la hauteur est écartée)
fn geocentric_to_geodetic(x: f64, y: f64, z: f64, a: f64, e2: f64) -> Geographic {
    let lon = y.atan2(x);
    let p = (x * x + y * y).sqrt();

    // Itération sur la latitude, convergence en 3-4 tours
    let mut lat = (z / (p * (1.0 - e2))).atan();
    for _ in 0..10 {
        let sin_lat = lat.sin();
        let n = a / (1.0 - e2 * sin_lat * sin_lat).sqrt();
        let h = p / lat.cos() - n;
        let next = (z / (p * (1.0 - e2 * n / (n + h)))).atan();
        if (next - lat).abs() < 1e-12 {
            lat = next;
            break;
        }
        lat = next;
    }

    Geographic::new(lon, lat)
}
