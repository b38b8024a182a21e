//! Panchang assembly: the five limbs plus the wider calendar context

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use engine_chart::local_sidereal_time;
use jyotish_core::{Body, JyotishError, ZodiacSign};
use jyotish_ephemeris::{Ephemeris, Zodiac};
use jyotish_time::julian_day;

use crate::limbs::{self, Karana, MoonNakshatra, Paksha, Tithi, Yoga};
use crate::suntimes::{sun_times, SunTimes};

pub const VARA_NAMES: [&str; 7] = [
    "Ravivara",
    "Somavara",
    "Mangalavara",
    "Budhavara",
    "Guruvara",
    "Shukravara",
    "Shanivara",
];

/// Amanta month names, anchored so that the Sun in sidereal Pisces gives
/// Chaitra.
pub const LUNAR_MONTHS: [&str; 12] = [
    "Chaitra",
    "Vaishakha",
    "Jyeshtha",
    "Ashadha",
    "Shravana",
    "Bhadrapada",
    "Ashvina",
    "Kartika",
    "Margashirsha",
    "Pausha",
    "Magha",
    "Phalguna",
];

/// The six seasons, one per month pair.
pub const RITUS: [&str; 6] = [
    "Vasanta",
    "Grishma",
    "Varsha",
    "Sharad",
    "Hemanta",
    "Shishira",
];

/// Day of the week, Sunday first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vara {
    /// 0 = Sunday.
    pub index: u8,
    pub name: String,
}

/// The full calendar snapshot for one instant and observer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Panchang {
    pub julian_day: f64,
    pub tithi: Tithi,
    pub nakshatra: MoonNakshatra,
    pub yoga: Yoga,
    pub karana: Karana,
    pub vara: Vara,
    pub paksha: Paksha,
    pub ritu: String,
    pub lunar_month: String,
    pub sun_times: SunTimes,
    /// Local sidereal time in degrees.
    pub sidereal_time: f64,
}

/// Compute the panchang at a UTC instant for an observer.
pub fn compute_panchang(
    ephemeris: &Ephemeris,
    utc: DateTime<Utc>,
    latitude: f64,
    longitude: f64,
) -> Result<Panchang, JyotishError> {
    let jd = julian_day(utc);

    let sun = ephemeris.body_state(jd, Body::Sun, Zodiac::Sidereal)?;
    let moon = ephemeris.body_state(jd, Body::Moon, Zodiac::Sidereal)?;

    let tithi = limbs::tithi(sun.longitude, moon.longitude, sun.speed, moon.speed);
    let nakshatra = limbs::moon_nakshatra(moon.longitude, moon.speed);
    let yoga = limbs::yoga(sun.longitude, moon.longitude, sun.speed, moon.speed);
    let karana = limbs::karana(sun.longitude, moon.longitude, sun.speed, moon.speed);
    let paksha = tithi.paksha;

    let vara_index = ((jd + 1.5).floor() as i64).rem_euclid(7) as usize;
    let vara = Vara {
        index: vara_index as u8,
        name: VARA_NAMES[vara_index].to_string(),
    };

    // Amanta approximation: the month follows the Sun's sidereal sign.
    let sun_sign = ZodiacSign::from_degree(sun.longitude);
    let month_index = (sun_sign.index() + 1) % 12;
    let lunar_month = LUNAR_MONTHS[month_index].to_string();
    let ritu = RITUS[month_index / 2].to_string();

    Ok(Panchang {
        julian_day: jd,
        tithi,
        nakshatra,
        yoga,
        karana,
        vara,
        paksha,
        ritu,
        lunar_month,
        sun_times: sun_times(ephemeris, utc.date_naive(), latitude, longitude),
        sidereal_time: local_sidereal_time(jd, longitude),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use jyotish_ephemeris::EphemerisConfig;

    fn eph() -> Ephemeris {
        Ephemeris::new(EphemerisConfig::default())
    }

    #[test]
    fn test_panchang_structure() {
        let utc = Utc.with_ymd_and_hms(2000, 9, 30, 6, 30, 0).unwrap();
        let p = compute_panchang(&eph(), utc, 22.5726, 88.3639).unwrap();

        assert!(p.tithi.index < 30);
        assert!(p.nakshatra.index < 27);
        assert!(p.yoga.index < 27);
        assert!(p.karana.index < 60);
        assert!((0.0..360.0).contains(&p.sidereal_time));
        assert!(p.sun_times.sunrise.is_some());
    }

    #[test]
    fn test_vara_for_known_saturday() {
        // 2000-09-30 was a Saturday.
        let utc = Utc.with_ymd_and_hms(2000, 9, 30, 6, 30, 0).unwrap();
        let p = compute_panchang(&eph(), utc, 22.5726, 88.3639).unwrap();
        assert_eq!(p.vara.index, 6);
        assert_eq!(p.vara.name, "Shanivara");
    }

    #[test]
    fn test_autumn_month_and_season() {
        // Sidereal Sun in Virgo at the end of September: Ashvina, Sharad.
        let utc = Utc.with_ymd_and_hms(2000, 9, 30, 6, 30, 0).unwrap();
        let p = compute_panchang(&eph(), utc, 22.5726, 88.3639).unwrap();
        assert_eq!(p.lunar_month, "Ashvina");
        assert_eq!(p.ritu, "Sharad");
    }

    #[test]
    fn test_paksha_consistency() {
        let utc = Utc.with_ymd_and_hms(2020, 1, 10, 12, 0, 0).unwrap();
        let p = compute_panchang(&eph(), utc, 28.6, 77.2).unwrap();
        assert_eq!(p.paksha, p.tithi.paksha);
    }
}
