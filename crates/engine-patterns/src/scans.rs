//! Per-day pattern evaluators and their fixed tables
//!
//! Every evaluator looks at one sampled day in isolation (state-change
//! detectors evaluate the previous sample directly), which keeps a sweep
//! independent of how the date range is partitioned.

use chrono::{Datelike, Duration, NaiveDate};

use jyotish_core::{
    arc_separation, within_arc, Body, JyotishError, Significance, ZodiacSign,
};
use jyotish_ephemeris::{Ephemeris, Zodiac};
use jyotish_time::julian_day_ymd;

use crate::types::{
    AspectType, EclipseKind, KalaSarpaKind, Pattern, PatternKind, StationKind,
};

/// Orb and significance per outer-planet pair.
pub const OUTER_PAIRS: [(Body, Body, f64, Significance); 6] = [
    (Body::Saturn, Body::Pluto, 5.0, Significance::Extreme),
    (Body::Jupiter, Body::Saturn, 5.0, Significance::High),
    (Body::Jupiter, Body::Pluto, 4.0, Significance::High),
    (Body::Uranus, Body::Pluto, 6.0, Significance::Extreme),
    (Body::Saturn, Body::Uranus, 5.0, Significance::High),
    (Body::Neptune, Body::Pluto, 8.0, Significance::Extreme),
];

/// Watched pairs for major aspects: orb and significance.
pub const ASPECT_PAIRS: [(Body, Body, f64, Significance); 4] = [
    (Body::Mars, Body::Saturn, 3.0, Significance::High),
    (Body::Saturn, Body::Uranus, 4.0, Significance::High),
    (Body::Jupiter, Body::Neptune, 4.0, Significance::Medium),
    (Body::Mars, Body::Rahu, 3.0, Significance::High),
];

/// Aspect kinds the pair watcher recognises.
const WATCHED_ASPECTS: [AspectType; 3] = [
    AspectType::Conjunction,
    AspectType::Opposition,
    AspectType::Square,
];

/// Planets watched for retrograde stations, with typical retrograde
/// window lengths in days.
pub const STATION_PLANETS: [(Body, (u16, u16)); 5] = [
    (Body::Mercury, (20, 24)),
    (Body::Venus, (40, 45)),
    (Body::Mars, (60, 80)),
    (Body::Jupiter, (120, 120)),
    (Body::Saturn, (140, 140)),
];

/// Ingress watchers: body and sweep step in days.
pub const INGRESS_PLANETS: [(Body, i64); 4] = [
    (Body::Mars, 1),
    (Body::Venus, 1),
    (Body::Jupiter, 7),
    (Body::Saturn, 7),
];

/// Bodies scanned daily for gandanta/critical degrees; the rest go weekly.
pub const FAST_BODIES: [Body; 5] = [
    Body::Sun,
    Body::Moon,
    Body::Mercury,
    Body::Venus,
    Body::Mars,
];

pub const SLOW_BODIES: [Body; 4] = [Body::Jupiter, Body::Saturn, Body::Rahu, Body::Ketu];

fn jd_at(date: NaiveDate) -> f64 {
    julian_day_ymd(date.year(), date.month(), date.day(), 0.0)
}

fn exact(orb: f64) -> bool {
    orb <= 1.0
}

// ---------------------------------------------------------------------------
// Outer-planet conjunctions (7-day cadence, tropical)
// ---------------------------------------------------------------------------

pub fn outer_conjunctions(eph: &Ephemeris, date: NaiveDate) -> Result<Vec<Pattern>, JyotishError> {
    let jd = jd_at(date);
    let mut found = Vec::new();
    for (first, second, orb, significance) in OUTER_PAIRS {
        let a = eph.body_state(jd, first, Zodiac::Tropical)?;
        let b = eph.body_state(jd, second, Zodiac::Tropical)?;
        let separation = arc_separation(a.longitude, b.longitude);
        if separation <= orb {
            found.push(Pattern::new(
                date,
                PatternKind::OuterConjunction {
                    first,
                    second,
                    separation,
                },
                significance,
                separation,
                exact(separation),
            ));
        }
    }
    Ok(found)
}

// ---------------------------------------------------------------------------
// Major aspects (3-day cadence, tropical)
// ---------------------------------------------------------------------------

/// Match a separation against the watched aspect angles within an orb.
pub fn match_aspect(separation: f64, orb: f64) -> Option<(AspectType, f64)> {
    WATCHED_ASPECTS
        .iter()
        .map(|aspect| (*aspect, (separation - aspect.angle()).abs()))
        .filter(|(_, distance)| *distance <= orb)
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

pub fn major_aspects(eph: &Ephemeris, date: NaiveDate) -> Result<Vec<Pattern>, JyotishError> {
    let jd = jd_at(date);
    let mut found = Vec::new();
    for (first, second, orb, significance) in ASPECT_PAIRS {
        let a = eph.body_state(jd, first, Zodiac::Tropical)?;
        let b = eph.body_state(jd, second, Zodiac::Tropical)?;
        let separation = arc_separation(a.longitude, b.longitude);
        if let Some((aspect, distance)) = match_aspect(separation, orb) {
            found.push(Pattern::new(
                date,
                PatternKind::MajorAspect {
                    first,
                    second,
                    aspect,
                    separation,
                },
                significance,
                distance,
                exact(distance),
            ));
        }
    }
    Ok(found)
}

// ---------------------------------------------------------------------------
// Eclipses (daily cadence)
// ---------------------------------------------------------------------------

pub fn eclipses(eph: &Ephemeris, date: NaiveDate) -> Result<Vec<Pattern>, JyotishError> {
    let jd = jd_at(date);
    let sun = eph.body_state(jd, Body::Sun, Zodiac::Tropical)?;
    let moon = eph.body_state(jd, Body::Moon, Zodiac::Tropical)?;
    let rahu = eph.body_state(jd, Body::Rahu, Zodiac::Tropical)?;

    let elongation = arc_separation(sun.longitude, moon.longitude);
    let node_distance = arc_separation(moon.longitude, rahu.longitude);

    let mut found = Vec::new();
    if node_distance < 15.0 {
        let node_proximity = if node_distance <= 8.0 {
            "rahu".to_string()
        } else {
            "close-to-rahu".to_string()
        };
        if elongation > 170.0 {
            found.push(Pattern::new(
                date,
                PatternKind::Eclipse {
                    kind: EclipseKind::Lunar,
                    elongation,
                    node_distance,
                    node_proximity,
                },
                Significance::High,
                node_distance,
                exact(180.0 - elongation),
            ));
        } else if elongation < 10.0 {
            found.push(Pattern::new(
                date,
                PatternKind::Eclipse {
                    kind: EclipseKind::Solar,
                    elongation,
                    node_distance,
                    node_proximity,
                },
                Significance::High,
                node_distance,
                exact(elongation),
            ));
        }
    }
    Ok(found)
}

// ---------------------------------------------------------------------------
// Retrograde stations (daily cadence, previous day evaluated directly)
// ---------------------------------------------------------------------------

pub fn retrograde_stations(
    eph: &Ephemeris,
    date: NaiveDate,
) -> Result<Vec<Pattern>, JyotishError> {
    let jd = jd_at(date);
    let jd_prev = jd_at(date - Duration::days(1));

    let mut found = Vec::new();
    for (body, window) in STATION_PLANETS {
        let today = eph.body_state(jd, body, Zodiac::Tropical)?;
        let yesterday = eph.body_state(jd_prev, body, Zodiac::Tropical)?;
        let retro_now = today.speed < 0.0;
        let retro_before = yesterday.speed < 0.0;
        if retro_now != retro_before {
            let station = if retro_now {
                StationKind::RetrogradeStart
            } else {
                StationKind::RetrogradeEnd
            };
            let significance = if body == Body::Mars {
                Significance::High
            } else {
                Significance::Medium
            };
            found.push(Pattern::new(
                date,
                PatternKind::RetrogradeStation {
                    body,
                    station,
                    typical_window_days: window,
                },
                significance,
                today.speed.abs(),
                today.speed.abs() <= 0.02,
            ));
        }
    }
    Ok(found)
}

// ---------------------------------------------------------------------------
// Cardinal ingresses (previous sample evaluated directly)
// ---------------------------------------------------------------------------

pub fn cardinal_ingress(
    eph: &Ephemeris,
    date: NaiveDate,
    body: Body,
    step_days: i64,
) -> Result<Vec<Pattern>, JyotishError> {
    let now = eph.body_state(jd_at(date), body, Zodiac::Tropical)?;
    let before = eph.body_state(jd_at(date - Duration::days(step_days)), body, Zodiac::Tropical)?;

    let to_sign = ZodiacSign::from_degree(now.longitude);
    let from_sign = ZodiacSign::from_degree(before.longitude);

    if to_sign != from_sign && to_sign.is_cardinal() {
        let degree_in = now.longitude % 30.0;
        let significance = match body {
            Body::Jupiter | Body::Saturn => Significance::High,
            _ => Significance::Medium,
        };
        return Ok(vec![Pattern::new(
            date,
            PatternKind::CardinalIngress {
                body,
                from_sign,
                to_sign,
            },
            significance,
            degree_in,
            exact(degree_in),
        )]);
    }
    Ok(Vec::new())
}

// ---------------------------------------------------------------------------
// Kala Sarpa (7-day cadence, sidereal)
// ---------------------------------------------------------------------------

/// Hemisphere test: all seven classical planets inside the arc from Rahu
/// to Rahu+180 (classic) or all outside it (reverse).
pub fn kala_sarpa_formation(rahu: f64, planets: &[f64]) -> Option<(KalaSarpaKind, f64)> {
    let inside = planets.iter().filter(|&&p| within_arc(p, rahu, 180.0)).count();
    let kind = if inside == planets.len() {
        KalaSarpaKind::Classic
    } else if inside == 0 {
        KalaSarpaKind::Reverse
    } else {
        return None;
    };

    // Clearance: the tightest distance from any planet to the nodal axis.
    let ketu = jyotish_core::norm_deg(rahu + 180.0);
    let clearance = planets
        .iter()
        .map(|&p| arc_separation(p, rahu).min(arc_separation(p, ketu)))
        .fold(f64::INFINITY, f64::min);
    Some((kind, clearance))
}

pub fn kala_sarpa(eph: &Ephemeris, date: NaiveDate) -> Result<Vec<Pattern>, JyotishError> {
    let jd = jd_at(date);
    let rahu = eph.body_state(jd, Body::Rahu, Zodiac::Sidereal)?;
    let mut longitudes = Vec::with_capacity(7);
    for body in Body::classical_seven() {
        longitudes.push(eph.body_state(jd, body, Zodiac::Sidereal)?.longitude);
    }

    Ok(match kala_sarpa_formation(rahu.longitude, &longitudes) {
        Some((kind, clearance)) => vec![Pattern::new(
            date,
            PatternKind::KalaSarpa { kind },
            Significance::High,
            clearance,
            clearance >= 5.0,
        )],
        None => Vec::new(),
    })
}

// ---------------------------------------------------------------------------
// Gandanta (sidereal, fire-water junctions)
// ---------------------------------------------------------------------------

/// Distance from the nearest fire-water junction if within one degree.
/// Junctions sit at 0 (Pisces/Aries), 120 (Cancer/Leo), 240 (Scorpio/
/// Sagittarius).
pub fn gandanta_offset(longitude: f64) -> Option<f64> {
    [0.0, 120.0, 240.0]
        .iter()
        .map(|&junction| arc_separation(longitude, junction))
        .filter(|&distance| distance <= 1.0)
        .min_by(f64::total_cmp)
}

pub fn gandanta(eph: &Ephemeris, date: NaiveDate, body: Body) -> Result<Vec<Pattern>, JyotishError> {
    let state = eph.body_state(jd_at(date), body, Zodiac::Sidereal)?;
    Ok(match gandanta_offset(state.longitude) {
        Some(distance) => vec![Pattern::new(
            date,
            PatternKind::Gandanta {
                body,
                longitude: state.longitude,
            },
            Significance::Medium,
            distance,
            distance <= 0.25,
        )],
        None => Vec::new(),
    })
}

// ---------------------------------------------------------------------------
// Critical degrees (sidereal)
// ---------------------------------------------------------------------------

/// Critical rounded degrees: 0 (new), 29 (anaretic), 13 and 26
/// (traditional).
pub fn critical_degree_of(degree_in_sign: f64) -> Option<(u8, Significance, f64)> {
    let rounded = degree_in_sign.round();
    let closeness = (degree_in_sign - rounded).abs();
    match rounded as i64 {
        0 => Some((0, Significance::Low, closeness)),
        29 => Some((29, Significance::High, closeness)),
        13 => Some((13, Significance::Medium, closeness)),
        26 => Some((26, Significance::Medium, closeness)),
        _ => None,
    }
}

pub fn critical_degree(
    eph: &Ephemeris,
    date: NaiveDate,
    body: Body,
) -> Result<Vec<Pattern>, JyotishError> {
    let state = eph.body_state(jd_at(date), body, Zodiac::Sidereal)?;
    let degree_in_sign = state.longitude % 30.0;
    Ok(match critical_degree_of(degree_in_sign) {
        Some((degree, significance, closeness)) => vec![Pattern::new(
            date,
            PatternKind::CriticalDegree {
                body,
                sign: ZodiacSign::from_degree(state.longitude),
                degree,
            },
            significance,
            closeness,
            closeness <= 0.25,
        )],
        None => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use jyotish_ephemeris::EphemerisConfig;

    fn eph() -> Ephemeris {
        Ephemeris::new(EphemerisConfig::default())
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_great_conjunction_2020() {
        let found = outer_conjunctions(&eph(), date(2020, 12, 21)).unwrap();
        let jupiter_saturn = found
            .iter()
            .find(|p| p.type_key() == "jupiter-saturn-conjunction");
        let p = jupiter_saturn.expect("great conjunction not detected");
        assert!(p.orb_or_strength <= 5.0);
        assert_eq!(p.significance, Significance::High);
    }

    #[test]
    fn test_saturn_pluto_2020() {
        let found = outer_conjunctions(&eph(), date(2020, 1, 12)).unwrap();
        let p = found
            .iter()
            .find(|p| p.type_key() == "saturn-pluto-conjunction")
            .expect("saturn-pluto conjunction not detected");
        assert_eq!(p.significance, Significance::Extreme);
        assert!(p.orb_or_strength <= 5.0);
    }

    #[test]
    fn test_match_aspect_picks_nearest() {
        assert_eq!(match_aspect(2.0, 3.0).unwrap().0, AspectType::Conjunction);
        assert_eq!(match_aspect(178.5, 3.0).unwrap().0, AspectType::Opposition);
        assert_eq!(match_aspect(91.0, 3.0).unwrap().0, AspectType::Square);
        assert!(match_aspect(45.0, 3.0).is_none());
    }

    #[test]
    fn test_solar_eclipse_july_2019() {
        // New moon fell at 19:16 UT on July 2; the midnight samples on the
        // surrounding days must catch it.
        let engine = eph();
        let mut found = Vec::new();
        for day in 1..=4 {
            found.extend(eclipses(&engine, date(2019, 7, day)).unwrap());
        }
        assert!(
            found.iter().any(|p| p.type_key() == "solar-eclipse"),
            "July 2019 solar eclipse not detected"
        );
    }

    #[test]
    fn test_lunar_eclipse_january_2019() {
        let found = eclipses(&eph(), date(2019, 1, 21)).unwrap();
        assert!(
            found.iter().any(|p| p.type_key() == "lunar-eclipse"),
            "2019-01-21 lunar eclipse not detected"
        );
    }

    #[test]
    fn test_no_eclipse_far_from_node() {
        // First quarter moon nowhere near the node.
        let found = eclipses(&eph(), date(2019, 4, 12)).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_kala_sarpa_formation_synthetic() {
        // All planets huddled 10..170 from Rahu at 0: classic.
        let planets = [10.0, 40.0, 80.0, 120.0, 150.0, 165.0, 170.0];
        let (kind, clearance) = kala_sarpa_formation(0.0, &planets).unwrap();
        assert_eq!(kind, KalaSarpaKind::Classic);
        assert!((clearance - 10.0).abs() < 1e-9);

        // All on the far side: reverse.
        let planets = [190.0, 220.0, 260.0, 300.0, 330.0, 350.0, 355.0];
        let (kind, _) = kala_sarpa_formation(0.0, &planets).unwrap();
        assert_eq!(kind, KalaSarpaKind::Reverse);

        // Split: no formation.
        let planets = [10.0, 40.0, 80.0, 120.0, 150.0, 165.0, 200.0];
        assert!(kala_sarpa_formation(0.0, &planets).is_none());
    }

    #[test]
    fn test_gandanta_offsets() {
        assert!(gandanta_offset(119.5).is_some()); // last degree of Cancer
        assert!(gandanta_offset(120.5).is_some()); // first degree of Leo
        assert!(gandanta_offset(239.2).is_some()); // last degree of Scorpio
        assert!(gandanta_offset(0.7).is_some()); // first degree of Aries
        assert!(gandanta_offset(359.4).is_some()); // last degree of Pisces
        assert!(gandanta_offset(125.0).is_none());
        assert!(gandanta_offset(60.0).is_none()); // Taurus/Gemini is not a junction
    }

    #[test]
    fn test_critical_degrees() {
        assert_eq!(critical_degree_of(0.2).unwrap().0, 0);
        assert_eq!(critical_degree_of(28.9).unwrap().0, 29);
        assert_eq!(critical_degree_of(29.4).unwrap().1, Significance::High);
        assert_eq!(critical_degree_of(13.3).unwrap().0, 13);
        assert_eq!(critical_degree_of(25.8).unwrap().0, 26);
        assert!(critical_degree_of(15.0).is_none());
        // 29.6 rounds to 30, which is not in the critical set.
        assert!(critical_degree_of(29.6).is_none());
    }

    #[test]
    fn test_station_detection_over_window() {
        // Mercury stationed retrograde around 2020-02-17 and direct around
        // 2020-03-10; a day-by-day scan over Q1 2020 must see both.
        let engine = eph();
        let mut starts = 0;
        let mut ends = 0;
        let mut day = date(2020, 1, 15);
        while day <= date(2020, 4, 15) {
            for p in retrograde_stations(&engine, day).unwrap() {
                if let PatternKind::RetrogradeStation { body, station, .. } = &p.kind {
                    if *body == Body::Mercury {
                        match station {
                            StationKind::RetrogradeStart => starts += 1,
                            StationKind::RetrogradeEnd => ends += 1,
                        }
                    }
                }
            }
            day += Duration::days(1);
        }
        assert_eq!(starts, 1, "expected one retrograde start");
        assert_eq!(ends, 1, "expected one retrograde end");
    }

    #[test]
    fn test_ingress_emits_only_on_cardinal_entry() {
        // Saturn entered tropical Aquarius (not cardinal) in 2020 and
        // tropical Capricorn (cardinal) in late 2017: scan both windows.
        let engine = eph();
        let mut day = date(2017, 11, 1);
        let mut capricorn_entries = 0;
        while day <= date(2018, 2, 1) {
            for p in cardinal_ingress(&engine, day, Body::Saturn, 7).unwrap() {
                if let PatternKind::CardinalIngress { to_sign, .. } = &p.kind {
                    assert!(to_sign.is_cardinal());
                    if *to_sign == ZodiacSign::Capricorn {
                        capricorn_entries += 1;
                    }
                }
            }
            day += Duration::days(7);
        }
        assert_eq!(capricorn_entries, 1);
    }
}
