//! Inverse Gauss-Krüger pour les zones autrichiennes (M28/M31/M34)
//!
//! Transverse Mercator sur Bessel 1841, facteur d'échelle 1, faux est 0,
//! faux nord -5 000 000 m. Série de Krüger classique ; l'erreur de
//! troncature reste sub-millimétrique dans l'emprise des zones (±1°40'
//! autour du méridien central).

use super::ellipsoid::Bessel1841;
use super::Geographic;

const K0: f64 = 1.0;
const FALSE_EASTING: f64 = 0.0;
const FALSE_NORTHING: f64 = -5_000_000.0;

/// Convertit un point Gauss-Krüger (MGI) en géographique sur le datum MGI
///
/// `lon0` est le méridien central de la zone, en radians.
pub fn gk_to_geographic(x: f64, y: f64, lon0: f64) -> Geographic {
    let a = Bessel1841::A;
    let e2 = Bessel1841::E2;
    let ep2 = Bessel1841::EP2;

    let x = x - FALSE_EASTING;
    let y = y - FALSE_NORTHING;

    // Latitude du pied de la perpendiculaire, depuis l'arc méridien
    let m = y / K0;
    let mu = m / (a * (1.0 - e2 / 4.0 - 3.0 * e2.powi(2) / 64.0 - 5.0 * e2.powi(3) / 256.0));

    let sqrt_1_e2 = (1.0 - e2).sqrt();
    let e1 = (1.0 - sqrt_1_e2) / (1.0 + sqrt_1_e2);

    let phi1 = mu
        + (3.0 * e1 / 2.0 - 27.0 * e1.powi(3) / 32.0) * (2.0 * mu).sin()
        + (21.0 * e1.powi(2) / 16.0 - 55.0 * e1.powi(4) / 32.0) * (4.0 * mu).sin()
        + (151.0 * e1.powi(3) / 96.0) * (6.0 * mu).sin()
        + (1097.0 * e1.powi(4) / 512.0) * (8.0 * mu).sin();

    let sin_phi1 = phi1.sin();
    let cos_phi1 = phi1.cos();
    let tan_phi1 = phi1.tan();

    let n1 = a / (1.0 - e2 * sin_phi1.powi(2)).sqrt();
    let t1 = tan_phi1.powi(2);
    let c1 = ep2 * cos_phi1.powi(2);
    let r1 = a * (1.0 - e2) / (1.0 - e2 * sin_phi1.powi(2)).powf(1.5);
    let d = x / (n1 * K0);

    let lat = phi1
        - (n1 * tan_phi1 / r1)
            * (d.powi(2) / 2.0
                - (5.0 + 3.0 * t1 + 10.0 * c1 - 4.0 * c1.powi(2) - 9.0 * ep2) * d.powi(4) / 24.0
                + (61.0 + 90.0 * t1 + 298.0 * c1 + 45.0 * t1.powi(2) - 252.0 * ep2
                    - 3.0 * c1.powi(2))
                    * d.powi(6)
                    / 720.0);

    let lon = lon0
        + (d - (1.0 + 2.0 * t1 + c1) * d.powi(3) / 6.0
            + (5.0 - 2.0 * c1 + 28.0 * t1 - 3.0 * c1.powi(2) + 8.0 * ep2 + 24.0 * t1.powi(2))
                * d.powi(5)
                / 120.0)
            / cos_phi1;

    Geographic::new(lon, lat)
}
