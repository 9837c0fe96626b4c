//! Constantes des ellipsoïdes utilisés
//!
//! Le datum autrichien MGI repose sur Bessel 1841 ; WGS84 sert aux cibles
//! mondiales (EPSG:4326 et Web Mercator).

/// Ellipsoïde Bessel 1841 (datum MGI)
pub struct Bessel1841;

impl Bessel1841 {
    /// Demi-grand axe (mètres)
    pub const A: f64 = 6_377_397.155;
    /// Aplatissement
    pub const F: f64 = 1.0 / 299.152_812_8;
    /// Première excentricité au carré
    pub const E2: f64 = 2.0 * Self::F - Self::F * Self::F;
    /// Première excentricité
    pub const E: f64 = 0.081_696_831_222_527_5; // sqrt(E2)
    /// Seconde excentricité au carré
    pub const EP2: f64 = Self::E2 / (1.0 - Self::E2);
}

/// Ellipsoïde WGS84
pub struct WGS84;

impl WGS84 {
    /// Demi-grand axe (mètres)
    pub const A: f64 = 6_378_137.0;
    /// Aplatissement
    pub const F: f64 = 1.0 / 298.257_223_563;
    /// Première excentricité au carré
    pub const E2: f64 = 2.0 * Self::F - Self::F * Self::F;
}
