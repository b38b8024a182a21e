//! Ascendant — the ecliptic longitude rising on the eastern horizon

use jyotish_core::{norm_deg, Ascendant, JyotishError};
use jyotish_ephemeris::ayanamsa;

const DEG2RAD: f64 = std::f64::consts::PI / 180.0;
const RAD2DEG: f64 = 180.0 / std::f64::consts::PI;
const J2000: f64 = 2_451_545.0;

/// Mean obliquity of the ecliptic, degrees.
pub fn obliquity(jd: f64) -> f64 {
    let t = (jd - J2000) / 36_525.0;
    23.439_291_1 - 0.013_004_2 * t - 1.64e-7 * t * t + 5.036e-7 * t * t * t
}

/// Greenwich mean sidereal time in degrees.
pub fn gmst_degrees(jd: f64) -> f64 {
    let t = (jd - J2000) / 36_525.0;
    norm_deg(
        280.460_618_37 + 360.985_647_366_29 * (jd - J2000) + 0.000_387_933 * t * t
            - t * t * t / 38_710_000.0,
    )
}

/// Local sidereal time in degrees for an east-positive longitude.
pub fn local_sidereal_time(jd: f64, longitude: f64) -> f64 {
    norm_deg(gmst_degrees(jd) + longitude)
}

/// Tropical ecliptic longitude of the east horizon.
pub fn tropical_ascendant(jd: f64, latitude: f64, longitude: f64) -> Result<f64, JyotishError> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(JyotishError::CoordinatesOutOfRange(format!(
            "latitude {latitude}"
        )));
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(JyotishError::CoordinatesOutOfRange(format!(
            "longitude {longitude}"
        )));
    }

    let ramc = local_sidereal_time(jd, longitude) * DEG2RAD;
    let obl = obliquity(jd) * DEG2RAD;
    let lat = latitude * DEG2RAD;

    let asc = ramc
        .cos()
        .atan2(-(ramc.sin() * obl.cos() + lat.tan() * obl.sin()));
    Ok(norm_deg(asc * RAD2DEG))
}

/// Sidereal ascendant with all derived fields.
pub fn sidereal_ascendant(
    jd: f64,
    latitude: f64,
    longitude: f64,
) -> Result<Ascendant, JyotishError> {
    let tropical = tropical_ascendant(jd, latitude, longitude)?;
    let sidereal = norm_deg(tropical - ayanamsa(jd) + 360.0);
    Ok(Ascendant::from_sidereal(sidereal))
}
