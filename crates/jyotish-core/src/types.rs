//! Shared types used across all jyotish engines

use serde::{Deserialize, Serialize};

use crate::angle::norm_deg;

// ---------------------------------------------------------------------------
// Zodiac signs
// ---------------------------------------------------------------------------

/// The twelve signs, ordered Aries..Pisces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

/// Classical elements, used by the navamsa start-sign rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

impl ZodiacSign {
    pub const ALL: [ZodiacSign; 12] = [
        ZodiacSign::Aries,
        ZodiacSign::Taurus,
        ZodiacSign::Gemini,
        ZodiacSign::Cancer,
        ZodiacSign::Leo,
        ZodiacSign::Virgo,
        ZodiacSign::Libra,
        ZodiacSign::Scorpio,
        ZodiacSign::Sagittarius,
        ZodiacSign::Capricorn,
        ZodiacSign::Aquarius,
        ZodiacSign::Pisces,
    ];

    /// Sign occupied by an ecliptic longitude (degrees, any range).
    pub fn from_degree(degree: f64) -> Self {
        let normalized = norm_deg(degree);
        Self::from_index((normalized / 30.0) as usize)
    }

    /// Sign by 0-based index, wrapping modulo 12.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 12]
    }

    /// 0-based index (Aries = 0).
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Fixed sign lord.
    pub fn lord(&self) -> Body {
        match self {
            ZodiacSign::Aries => Body::Mars,
            ZodiacSign::Taurus => Body::Venus,
            ZodiacSign::Gemini => Body::Mercury,
            ZodiacSign::Cancer => Body::Moon,
            ZodiacSign::Leo => Body::Sun,
            ZodiacSign::Virgo => Body::Mercury,
            ZodiacSign::Libra => Body::Venus,
            ZodiacSign::Scorpio => Body::Mars,
            ZodiacSign::Sagittarius => Body::Jupiter,
            ZodiacSign::Capricorn => Body::Saturn,
            ZodiacSign::Aquarius => Body::Saturn,
            ZodiacSign::Pisces => Body::Jupiter,
        }
    }

    pub fn element(&self) -> Element {
        match self.index() % 4 {
            0 => Element::Fire,
            1 => Element::Earth,
            2 => Element::Air,
            _ => Element::Water,
        }
    }

    /// Aries, Cancer, Libra, Capricorn.
    pub fn is_cardinal(&self) -> bool {
        self.index() % 3 == 0
    }
}

impl std::fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ZodiacSign::Aries => "Aries",
            ZodiacSign::Taurus => "Taurus",
            ZodiacSign::Gemini => "Gemini",
            ZodiacSign::Cancer => "Cancer",
            ZodiacSign::Leo => "Leo",
            ZodiacSign::Virgo => "Virgo",
            ZodiacSign::Libra => "Libra",
            ZodiacSign::Scorpio => "Scorpio",
            ZodiacSign::Sagittarius => "Sagittarius",
            ZodiacSign::Capricorn => "Capricorn",
            ZodiacSign::Aquarius => "Aquarius",
            ZodiacSign::Pisces => "Pisces",
        };
        write!(f, "{name}")
    }
}

// ---------------------------------------------------------------------------
// Bodies
// ---------------------------------------------------------------------------

/// Every body the platform computes. The sidereal chart uses the nine
/// grahas; the pattern detector additionally uses the trans-Saturnians in
/// the tropical frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Body {
    Sun,
    Moon,
    Mars,
    Mercury,
    Jupiter,
    Venus,
    Saturn,
    Rahu,
    Ketu,
    Uranus,
    Neptune,
    Pluto,
}

impl Body {
    /// The nine grahas of the sidereal chart.
    pub fn sidereal_nine() -> [Body; 9] {
        [
            Body::Sun,
            Body::Moon,
            Body::Mars,
            Body::Mercury,
            Body::Jupiter,
            Body::Venus,
            Body::Saturn,
            Body::Rahu,
            Body::Ketu,
        ]
    }

    /// The seven classical planets (no nodes).
    pub fn classical_seven() -> [Body; 7] {
        [
            Body::Sun,
            Body::Moon,
            Body::Mars,
            Body::Mercury,
            Body::Jupiter,
            Body::Venus,
            Body::Saturn,
        ]
    }

    pub fn trans_saturnian() -> [Body; 3] {
        [Body::Uranus, Body::Neptune, Body::Pluto]
    }

    pub fn is_node(&self) -> bool {
        matches!(self, Body::Rahu | Body::Ketu)
    }

    /// The nodes are treated as perpetually retrograde; classical bodies
    /// derive the flag from longitude speed.
    pub fn always_retrograde(&self) -> bool {
        self.is_node()
    }
}

impl std::fmt::Display for Body {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Body::Sun => "Sun",
            Body::Moon => "Moon",
            Body::Mars => "Mars",
            Body::Mercury => "Mercury",
            Body::Jupiter => "Jupiter",
            Body::Venus => "Venus",
            Body::Saturn => "Saturn",
            Body::Rahu => "Rahu",
            Body::Ketu => "Ketu",
            Body::Uranus => "Uranus",
            Body::Neptune => "Neptune",
            Body::Pluto => "Pluto",
        };
        write!(f, "{name}")
    }
}

// ---------------------------------------------------------------------------
// Significance and dignity scales
// ---------------------------------------------------------------------------

/// Shared four-step scale for pattern significance and event impact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Significance {
    Low,
    Medium,
    High,
    Extreme,
}

impl Significance {
    /// Rank 1..4 used by the impact-alignment score.
    pub fn rank(&self) -> u8 {
        *self as u8 + 1
    }
}

impl std::fmt::Display for Significance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Significance::Low => "low",
            Significance::Medium => "medium",
            Significance::High => "high",
            Significance::Extreme => "extreme",
        };
        write!(f, "{name}")
    }
}

/// Simplified planetary strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dignity {
    Exalted,
    Strong,
    Medium,
    Weak,
    Debilitated,
}

impl Dignity {
    pub fn score(&self) -> u8 {
        match self {
            Dignity::Exalted => 100,
            Dignity::Strong => 75,
            Dignity::Medium => 50,
            Dignity::Weak => 25,
            Dignity::Debilitated => 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Nakshatra tables
// ---------------------------------------------------------------------------

pub const NAKSHATRA_COUNT: usize = 27;

/// Arc of one nakshatra: 13°20'.
pub const NAKSHATRA_ARC: f64 = 360.0 / 27.0;

/// Arc of one pada: 3°20'.
pub const PADA_ARC: f64 = 360.0 / 108.0;

pub const NAKSHATRA_NAMES: [&str; 27] = [
    "Ashwini",
    "Bharani",
    "Krittika",
    "Rohini",
    "Mrigashira",
    "Ardra",
    "Punarvasu",
    "Pushya",
    "Ashlesha",
    "Magha",
    "Purva Phalguni",
    "Uttara Phalguni",
    "Hasta",
    "Chitra",
    "Swati",
    "Vishakha",
    "Anuradha",
    "Jyeshtha",
    "Mula",
    "Purva Ashadha",
    "Uttara Ashadha",
    "Shravana",
    "Dhanishta",
    "Shatabhisha",
    "Purva Bhadrapada",
    "Uttara Bhadrapada",
    "Revati",
];

/// Vimshottari lord cycle; the lord of nakshatra `i` is entry `i % 9`.
pub const VIMSHOTTARI_LORDS: [Body; 9] = [
    Body::Ketu,
    Body::Venus,
    Body::Sun,
    Body::Moon,
    Body::Mars,
    Body::Rahu,
    Body::Jupiter,
    Body::Saturn,
    Body::Mercury,
];

/// Mahadasha length in years per lord; the cycle sums to 120.
pub fn dasha_years(lord: Body) -> Option<f64> {
    match lord {
        Body::Sun => Some(6.0),
        Body::Moon => Some(10.0),
        Body::Mars => Some(7.0),
        Body::Rahu => Some(18.0),
        Body::Jupiter => Some(16.0),
        Body::Saturn => Some(19.0),
        Body::Mercury => Some(17.0),
        Body::Ketu => Some(7.0),
        Body::Venus => Some(20.0),
        _ => None,
    }
}

/// 0-based nakshatra index for a sidereal longitude.
pub fn nakshatra_index(longitude: f64) -> usize {
    ((norm_deg(longitude) / NAKSHATRA_ARC) as usize).min(NAKSHATRA_COUNT - 1)
}

/// Planetary lord of the nakshatra at a sidereal longitude.
pub fn nakshatra_lord(index: usize) -> Body {
    VIMSHOTTARI_LORDS[index % 9]
}

/// Pada (1..4) within the nakshatra at a sidereal longitude.
pub fn pada_of(longitude: f64) -> u8 {
    let within = norm_deg(longitude) % NAKSHATRA_ARC;
    ((within / PADA_ARC) as u8).min(3) + 1
}

// ---------------------------------------------------------------------------
// Karana slots
// ---------------------------------------------------------------------------

/// Seven movable karanas, cycling from Bava over half-tithis 0..56.
pub const MOVABLE_KARANAS: [&str; 7] = [
    "Bava",
    "Balava",
    "Kaulava",
    "Taitila",
    "Garaja",
    "Vanija",
    "Vishti",
];

/// Four fixed karanas occupying half-tithis 57..60.
pub const FIXED_KARANAS: [&str; 4] = ["Shakuni", "Chatushpada", "Naga", "Kimstughna"];

// ---------------------------------------------------------------------------
// Planetary positions
// ---------------------------------------------------------------------------

/// A body's place in the sidereal zodiac with all derived fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanetaryPosition {
    pub body: Body,
    /// Sidereal ecliptic longitude, degrees in [0, 360).
    pub longitude: f64,
    /// Ecliptic latitude, degrees.
    pub latitude: f64,
    /// Daily motion in longitude, degrees/day.
    pub speed: f64,
    pub sign: ZodiacSign,
    /// Degrees into the sign, [0, 30).
    pub degree_in_sign: f64,
    /// 0-based nakshatra index.
    pub nakshatra: u8,
    pub nakshatra_name: String,
    /// Pada 1..4.
    pub pada: u8,
    pub is_retrograde: bool,
    pub sign_lord: Body,
}

impl PlanetaryPosition {
    /// Build a full position from a sidereal longitude/latitude/speed triple.
    pub fn from_sidereal(body: Body, longitude: f64, latitude: f64, speed: f64) -> Self {
        let longitude = norm_deg(longitude);
        let sign = ZodiacSign::from_degree(longitude);
        let nakshatra = nakshatra_index(longitude);
        PlanetaryPosition {
            body,
            longitude,
            latitude,
            speed,
            sign,
            degree_in_sign: longitude % 30.0,
            nakshatra: nakshatra as u8,
            nakshatra_name: NAKSHATRA_NAMES[nakshatra].to_string(),
            pada: pada_of(longitude),
            is_retrograde: body.always_retrograde() || speed < 0.0,
            sign_lord: sign.lord(),
        }
    }
}

/// The rising point. Same shape as a planetary position, minus motion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ascendant {
    /// Sidereal ecliptic longitude, degrees in [0, 360).
    pub longitude: f64,
    pub sign: ZodiacSign,
    pub degree_in_sign: f64,
    pub nakshatra: u8,
    pub nakshatra_name: String,
    pub pada: u8,
    pub sign_lord: Body,
}

impl Ascendant {
    pub fn from_sidereal(longitude: f64) -> Self {
        let longitude = norm_deg(longitude);
        let sign = ZodiacSign::from_degree(longitude);
        let nakshatra = nakshatra_index(longitude);
        Ascendant {
            longitude,
            sign,
            degree_in_sign: longitude % 30.0,
            nakshatra: nakshatra as u8,
            nakshatra_name: NAKSHATRA_NAMES[nakshatra].to_string(),
            pada: pada_of(longitude),
            sign_lord: sign.lord(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_from_degree() {
        assert_eq!(ZodiacSign::from_degree(0.0), ZodiacSign::Aries);
        assert_eq!(ZodiacSign::from_degree(45.0), ZodiacSign::Taurus);
        assert_eq!(ZodiacSign::from_degree(359.9), ZodiacSign::Pisces);
        assert_eq!(ZodiacSign::from_degree(-5.0), ZodiacSign::Pisces);
    }

    #[test]
    fn test_sign_lords() {
        assert_eq!(ZodiacSign::Aries.lord(), Body::Mars);
        assert_eq!(ZodiacSign::Leo.lord(), Body::Sun);
        assert_eq!(ZodiacSign::Aquarius.lord(), Body::Saturn);
        assert_eq!(ZodiacSign::Pisces.lord(), Body::Jupiter);
    }

    #[test]
    fn test_cardinal_signs() {
        let cardinal: Vec<ZodiacSign> = ZodiacSign::ALL
            .iter()
            .copied()
            .filter(|s| s.is_cardinal())
            .collect();
        assert_eq!(
            cardinal,
            vec![
                ZodiacSign::Aries,
                ZodiacSign::Cancer,
                ZodiacSign::Libra,
                ZodiacSign::Capricorn
            ]
        );
    }

    #[test]
    fn test_elements_repeat_by_four() {
        assert_eq!(ZodiacSign::Aries.element(), Element::Fire);
        assert_eq!(ZodiacSign::Taurus.element(), Element::Earth);
        assert_eq!(ZodiacSign::Gemini.element(), Element::Air);
        assert_eq!(ZodiacSign::Cancer.element(), Element::Water);
        assert_eq!(ZodiacSign::Leo.element(), Element::Fire);
        assert_eq!(ZodiacSign::Pisces.element(), Element::Water);
    }

    #[test]
    fn test_dasha_years_sum_to_120() {
        let total: f64 = VIMSHOTTARI_LORDS
            .iter()
            .map(|l| dasha_years(*l).unwrap())
            .sum();
        assert!((total - 120.0).abs() < 1e-12);
    }

    #[test]
    fn test_dasha_years_rejects_outer_bodies() {
        assert!(dasha_years(Body::Pluto).is_none());
    }

    #[test]
    fn test_nakshatra_index_and_pada() {
        assert_eq!(nakshatra_index(0.0), 0);
        assert_eq!(nakshatra_index(13.4), 1);
        assert_eq!(nakshatra_index(359.99), 26);
        assert_eq!(pada_of(0.0), 1);
        assert_eq!(pada_of(3.4), 2);
        assert_eq!(pada_of(13.0), 4);
    }

    #[test]
    fn test_nakshatra_lord_cycle() {
        assert_eq!(nakshatra_lord(0), Body::Ketu);
        assert_eq!(nakshatra_lord(8), Body::Mercury);
        assert_eq!(nakshatra_lord(9), Body::Ketu);
        assert_eq!(nakshatra_lord(26), Body::Mercury);
    }

    #[test]
    fn test_significance_rank() {
        assert_eq!(Significance::Low.rank(), 1);
        assert_eq!(Significance::Extreme.rank(), 4);
        assert!(Significance::High > Significance::Medium);
    }

    #[test]
    fn test_position_derivations() {
        let p = PlanetaryPosition::from_sidereal(Body::Moon, 184.5, -1.2, 13.1);
        assert_eq!(p.sign, ZodiacSign::Libra);
        assert!((p.degree_in_sign - 4.5).abs() < 1e-9);
        assert_eq!(p.nakshatra, 13);
        assert_eq!(p.nakshatra_name, "Chitra");
        assert!(!p.is_retrograde);
        assert_eq!(p.sign_lord, Body::Venus);
    }

    #[test]
    fn test_nodes_always_retrograde() {
        let rahu = PlanetaryPosition::from_sidereal(Body::Rahu, 80.0, 0.0, -0.053);
        assert!(rahu.is_retrograde);
        let ketu = PlanetaryPosition::from_sidereal(Body::Ketu, 260.0, 0.0, -0.053);
        assert!(ketu.is_retrograde);
    }

    #[test]
    fn test_sign_degree_roundtrip() {
        let lon = 247.8123;
        let p = PlanetaryPosition::from_sidereal(Body::Saturn, lon, 0.0, 0.03);
        let rebuilt = p.sign.index() as f64 * 30.0 + p.degree_in_sign;
        assert!((rebuilt - lon).abs() < 1e-9);
    }
}
