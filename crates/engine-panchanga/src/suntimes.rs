//! Sunrise, sunset, and solar noon
//!
//! Hour-angle method: solar declination from the apparent longitude, the
//! equation of time from the mean elements, and the standard -0.833 degree
//! altitude for the refracted upper limb. Polar conditions produce `None`
//! rather than an error.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use jyotish_core::Body;
use jyotish_ephemeris::{EclipticState, Ephemeris, Zodiac};
use jyotish_time::julian_day_ymd;

const DEG2RAD: f64 = std::f64::consts::PI / 180.0;
const RAD2DEG: f64 = 180.0 / std::f64::consts::PI;
const J2000: f64 = 2_451_545.0;

/// Horizon-crossing times for one civil day at an observer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SunTimes {
    pub sunrise: Option<DateTime<Utc>>,
    pub sunset: Option<DateTime<Utc>>,
    pub solar_noon: Option<DateTime<Utc>>,
    pub day_length_hours: Option<f64>,
}

impl SunTimes {
    fn unavailable() -> Self {
        SunTimes {
            sunrise: None,
            sunset: None,
            solar_noon: None,
            day_length_hours: None,
        }
    }
}

/// Sun times for the UTC date of `date` at (lat, lon). East longitudes
/// positive.
pub fn sun_times(ephemeris: &Ephemeris, date: NaiveDate, latitude: f64, longitude: f64) -> SunTimes {
    use chrono::Datelike;

    let jd_noon = julian_day_ymd(date.year(), date.month(), date.day(), 12.0);

    // Tropical solar longitude drives the declination.
    let sun: EclipticState = match ephemeris.body_state(jd_noon, Body::Sun, Zodiac::Tropical) {
        Ok(state) => state,
        Err(error) => {
            tracing::warn!(%date, %error, "sun times unavailable");
            return SunTimes::unavailable();
        }
    };

    let t = (jd_noon - J2000) / 36_525.0;
    let obliquity = (23.439_291_1 - 0.013_004_2 * t) * DEG2RAD;
    let declination = (obliquity.sin() * (sun.longitude * DEG2RAD).sin()).asin();

    let eot_minutes = equation_of_time_minutes(t);
    let noon_utc_hours = 12.0 - longitude / 15.0 - eot_minutes / 60.0;

    let lat = latitude * DEG2RAD;
    // Refraction plus solar semi-diameter: altitude -0.833 degrees.
    let zenith = 90.833 * DEG2RAD;
    let cos_hour_angle =
        (zenith.cos() - lat.sin() * declination.sin()) / (lat.cos() * declination.cos());

    if !(-1.0..=1.0).contains(&cos_hour_angle) || !cos_hour_angle.is_finite() {
        // Midnight sun or polar night: only the transit is defined.
        return SunTimes {
            sunrise: None,
            sunset: None,
            solar_noon: utc_at(date, noon_utc_hours),
            day_length_hours: None,
        };
    }

    let hour_angle_hours = cos_hour_angle.acos() * RAD2DEG / 15.0;

    SunTimes {
        sunrise: utc_at(date, noon_utc_hours - hour_angle_hours),
        sunset: utc_at(date, noon_utc_hours + hour_angle_hours),
        solar_noon: utc_at(date, noon_utc_hours),
        day_length_hours: Some(2.0 * hour_angle_hours),
    }
}

/// Meeus equation of time, minutes. Positive when the true sun crosses the
/// meridian before mean noon.
fn equation_of_time_minutes(t: f64) -> f64 {
    let l0 = (280.46646 + 36_000.76983 * t).rem_euclid(360.0) * DEG2RAD;
    let m = (357.52911 + 35_999.05029 * t).rem_euclid(360.0) * DEG2RAD;
    let ecc = 0.016_708_634 - 0.000_042_037 * t;
    let obliquity = (23.439_291_1 - 0.013_004_2 * t) * DEG2RAD;
    let y = (obliquity / 2.0).tan().powi(2);

    let eot = y * (2.0 * l0).sin() - 2.0 * ecc * m.sin()
        + 4.0 * ecc * y * m.sin() * (2.0 * l0).cos()
        - 0.5 * y * y * (4.0 * l0).sin()
        - 1.25 * ecc * ecc * (2.0 * m).sin();
    eot * RAD2DEG * 4.0
}

fn utc_at(date: NaiveDate, decimal_hours: f64) -> Option<DateTime<Utc>> {
    let base = Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?);
    let seconds = (decimal_hours * 3600.0).round() as i64;
    Some(base + Duration::seconds(seconds))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;
    use jyotish_ephemeris::EphemerisConfig;

    fn eph() -> Ephemeris {
        Ephemeris::new(EphemerisConfig::default())
    }

    #[test]
    fn test_equinox_day_near_twelve_hours() {
        let date = NaiveDate::from_ymd_opt(2000, 3, 20).unwrap();
        let times = sun_times(&eph(), date, 22.57, 88.36);
        let length = times.day_length_hours.unwrap();
        assert!((length - 12.0).abs() < 0.3, "day length = {length}");
    }

    #[test]
    fn test_sunrise_before_noon_before_sunset() {
        let date = NaiveDate::from_ymd_opt(2020, 6, 21).unwrap();
        let times = sun_times(&eph(), date, 51.5, -0.12);
        let sunrise = times.sunrise.unwrap();
        let noon = times.solar_noon.unwrap();
        let sunset = times.sunset.unwrap();
        assert!(sunrise < noon && noon < sunset);
        // London summer solstice: about 16.6 hours of daylight.
        let length = times.day_length_hours.unwrap();
        assert!((length - 16.6).abs() < 0.5, "day length = {length}");
    }

    #[test]
    fn test_polar_night_returns_none() {
        let date = NaiveDate::from_ymd_opt(2020, 12, 21).unwrap();
        let times = sun_times(&eph(), date, 78.2, 15.6); // Svalbard
        assert!(times.sunrise.is_none());
        assert!(times.sunset.is_none());
        assert!(times.day_length_hours.is_none());
        assert!(times.solar_noon.is_some());
    }

    #[test]
    fn test_kolkata_solar_noon_offset() {
        // Kolkata is ~88.4 east; with the late-September equation of time
        // (about +10 min) solar noon falls near 05:57 UTC.
        let date = NaiveDate::from_ymd_opt(2000, 9, 30).unwrap();
        let times = sun_times(&eph(), date, 22.57, 88.36);
        let noon = times.solar_noon.unwrap();
        let decimal = noon.hour() as f64 + noon.minute() as f64 / 60.0;
        assert!((decimal - 5.94).abs() < 0.25, "solar noon at {decimal}h UTC");
    }
}
