//! The lunar limbs: tithi, nakshatra of the Moon, yoga, karana
//!
//! All limbs are computed from sidereal longitudes. End-time estimates use
//! the relative angular speeds of the bodies involved and degrade to `None`
//! when the relative motion is non-positive.

use serde::{Deserialize, Serialize};

use jyotish_core::{
    nakshatra_index, norm_deg, pada_of, FIXED_KARANAS, MOVABLE_KARANAS, NAKSHATRA_ARC,
    NAKSHATRA_NAMES,
};

/// Arc of one tithi in degrees of Sun-Moon elongation.
const TITHI_ARC: f64 = 12.0;

/// Arc of one karana (half tithi).
const KARANA_ARC: f64 = 6.0;

/// Arc of one yoga.
const YOGA_ARC: f64 = 360.0 / 27.0;

pub const TITHI_NAMES: [&str; 15] = [
    "Pratipada",
    "Dwitiya",
    "Tritiya",
    "Chaturthi",
    "Panchami",
    "Shashthi",
    "Saptami",
    "Ashtami",
    "Navami",
    "Dashami",
    "Ekadashi",
    "Dwadashi",
    "Trayodashi",
    "Chaturdashi",
    "Purnima",
];

pub const YOGA_NAMES: [&str; 27] = [
    "Vishkambha",
    "Priti",
    "Ayushman",
    "Saubhagya",
    "Shobhana",
    "Atiganda",
    "Sukarma",
    "Dhriti",
    "Shula",
    "Ganda",
    "Vriddhi",
    "Dhruva",
    "Vyaghata",
    "Harshana",
    "Vajra",
    "Siddhi",
    "Vyatipata",
    "Variyan",
    "Parigha",
    "Shiva",
    "Siddha",
    "Sadhya",
    "Shubha",
    "Shukla",
    "Brahma",
    "Indra",
    "Vaidhriti",
];

/// Lunar fortnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Paksha {
    /// Waxing.
    Shukla,
    /// Waning.
    Krishna,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tithi {
    /// 0..29 across the lunation.
    pub index: u8,
    pub name: String,
    pub paksha: Paksha,
    /// Fraction of the tithi already elapsed, [0, 1).
    pub progress: f64,
    /// Estimated hours until the tithi ends.
    pub hours_to_end: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoonNakshatra {
    /// 0..26.
    pub index: u8,
    pub name: String,
    /// Pada 1..4.
    pub pada: u8,
    pub progress: f64,
    pub hours_to_end: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Yoga {
    /// 0..26.
    pub index: u8,
    pub name: String,
    pub progress: f64,
    pub hours_to_end: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Karana {
    /// Half-tithi slot 0..59.
    pub index: u8,
    pub name: String,
    pub hours_to_end: Option<f64>,
}

/// Tithi from sidereal Sun/Moon longitudes and speeds (degrees/day).
pub fn tithi(sun_long: f64, moon_long: f64, sun_speed: f64, moon_speed: f64) -> Tithi {
    let elongation = norm_deg(moon_long - sun_long);
    let index = ((elongation / TITHI_ARC) as usize).min(29);
    let within = elongation % TITHI_ARC;

    let name = match index {
        14 => "Purnima".to_string(),
        29 => "Amavasya".to_string(),
        i if i < 15 => format!("{} (Shukla)", TITHI_NAMES[i]),
        i => format!("{} (Krishna)", TITHI_NAMES[i - 15]),
    };

    Tithi {
        index: index as u8,
        name,
        paksha: if index < 15 {
            Paksha::Shukla
        } else {
            Paksha::Krishna
        },
        progress: within / TITHI_ARC,
        hours_to_end: hours_until(TITHI_ARC - within, moon_speed - sun_speed),
    }
}

/// The Moon's nakshatra from its sidereal longitude and speed.
pub fn moon_nakshatra(moon_long: f64, moon_speed: f64) -> MoonNakshatra {
    let longitude = norm_deg(moon_long);
    let index = nakshatra_index(longitude);
    let within = longitude % NAKSHATRA_ARC;

    MoonNakshatra {
        index: index as u8,
        name: NAKSHATRA_NAMES[index].to_string(),
        pada: pada_of(longitude),
        progress: within / NAKSHATRA_ARC,
        hours_to_end: hours_until(NAKSHATRA_ARC - within, moon_speed),
    }
}

/// Yoga from the sum of sidereal Sun and Moon longitudes.
pub fn yoga(sun_long: f64, moon_long: f64, sun_speed: f64, moon_speed: f64) -> Yoga {
    let combined = norm_deg(sun_long + moon_long);
    let index = ((combined / YOGA_ARC) as usize).min(26);
    let within = combined % YOGA_ARC;

    Yoga {
        index: index as u8,
        name: YOGA_NAMES[index].to_string(),
        progress: within / YOGA_ARC,
        hours_to_end: hours_until(YOGA_ARC - within, sun_speed + moon_speed),
    }
}

/// Karana: the half-tithi. Slots 57..59 are the fixed karanas; the rest
/// cycle through the seven movable names starting from Bava.
pub fn karana(sun_long: f64, moon_long: f64, sun_speed: f64, moon_speed: f64) -> Karana {
    let elongation = norm_deg(moon_long - sun_long);
    let index = ((elongation / KARANA_ARC) as usize).min(59);
    let within = elongation % KARANA_ARC;

    let name = if index >= 57 {
        FIXED_KARANAS[index - 57].to_string()
    } else {
        MOVABLE_KARANAS[index % 7].to_string()
    };

    Karana {
        index: index as u8,
        name,
        hours_to_end: hours_until(KARANA_ARC - within, moon_speed - sun_speed),
    }
}

/// Hours until `remaining_deg` is covered at `relative_speed` deg/day.
fn hours_until(remaining_deg: f64, relative_speed: f64) -> Option<f64> {
    if relative_speed <= 0.0 {
        return None;
    }
    Some(remaining_deg / (relative_speed / 24.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tithi_index_and_paksha() {
        // Elongation 0: first tithi of the bright half.
        let t = tithi(100.0, 100.0, 1.0, 13.0);
        assert_eq!(t.index, 0);
        assert_eq!(t.paksha, Paksha::Shukla);
        assert!(t.name.contains("Pratipada"));

        // Elongation 180: Purnima boundary crossed into Krishna paksha.
        let t = tithi(100.0, 281.0, 1.0, 13.0);
        assert_eq!(t.index, 15);
        assert_eq!(t.paksha, Paksha::Krishna);

        // Elongation 356: Amavasya.
        let t = tithi(100.0, 96.0, 1.0, 13.0);
        assert_eq!(t.index, 29);
        assert_eq!(t.name, "Amavasya");
    }

    #[test]
    fn test_tithi_end_estimate() {
        // 6 degrees into a tithi, relative speed 12 deg/day: half a tithi
        // remains, i.e. 12 hours.
        let t = tithi(0.0, 6.0, 1.0, 13.0);
        let hours = t.hours_to_end.unwrap();
        assert!((hours - 12.0).abs() < 1e-9, "hours = {hours}");
    }

    #[test]
    fn test_tithi_end_none_when_moon_slower() {
        let t = tithi(0.0, 6.0, 13.0, 1.0);
        assert!(t.hours_to_end.is_none());
    }

    #[test]
    fn test_moon_nakshatra() {
        let n = moon_nakshatra(184.5, 13.0);
        assert_eq!(n.index, 13);
        assert_eq!(n.name, "Chitra");
        assert!(n.progress > 0.0 && n.progress < 1.0);
        assert!(n.hours_to_end.unwrap() > 0.0);
    }

    #[test]
    fn test_yoga_wraps_sum() {
        let y = yoga(350.0, 20.0, 1.0, 13.0);
        // Sum = 370 -> 10 degrees -> index 0.
        assert_eq!(y.index, 0);
        assert_eq!(y.name, "Vishkambha");
    }

    #[test]
    fn test_karana_movable_cycle() {
        // Slot 0 is Bava, slot 7 cycles back to Bava.
        let k = karana(0.0, 1.0, 1.0, 13.0);
        assert_eq!(k.index, 0);
        assert_eq!(k.name, "Bava");
        let k = karana(0.0, 43.0, 1.0, 13.0);
        assert_eq!(k.index, 7);
        assert_eq!(k.name, "Bava");
    }

    #[test]
    fn test_karana_fixed_slots() {
        // Elongation 343 -> slot 57: Shakuni.
        let k = karana(0.0, 343.0, 1.0, 13.0);
        assert_eq!(k.index, 57);
        assert_eq!(k.name, "Shakuni");
        // Slot 59: Naga.
        let k = karana(0.0, 355.0, 1.0, 13.0);
        assert_eq!(k.index, 59);
        assert_eq!(k.name, "Naga");
    }
}
