//! Vedic aspects (drishti) and conjunctions over whole-sign houses
//!
//! Drishti is directed and counted in houses from the casting body:
//! Jupiter casts on the 5th, 7th and 9th; Mars on the 4th, 7th and 8th;
//! Saturn on the 3rd, 7th and 10th; the nodes mirror Jupiter; everything
//! else casts only on the 7th. Two bodies sharing a house conjoin.

use serde::{Deserialize, Serialize};

use jyotish_core::Body;

use crate::houses::{house_number, Chart};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectKind {
    Drishti,
    Conjunction,
}

/// A directed aspect or an unordered conjunction. `to_body` is `None` for
/// drishti onto an empty house, kept for completeness.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Aspect {
    pub from_body: Body,
    pub to_body: Option<Body>,
    pub from_house: u8,
    pub to_house: u8,
    pub kind: AspectKind,
}

/// House offsets a body casts drishti on.
pub fn drishti_offsets(body: Body) -> &'static [u8] {
    match body {
        Body::Jupiter | Body::Rahu | Body::Ketu => &[5, 7, 9],
        Body::Mars => &[4, 7, 8],
        Body::Saturn => &[3, 7, 10],
        _ => &[7],
    }
}

/// All drishti and conjunction relations in a chart.
pub fn compute_aspects(chart: &Chart) -> Vec<Aspect> {
    let asc_sign = chart.ascendant.sign;
    let mut aspects = Vec::new();

    // Conjunctions: unordered pairs sharing a house, emitted once.
    let bodies: Vec<Body> = chart.positions.keys().copied().collect();
    for (i, &a) in bodies.iter().enumerate() {
        for &b in &bodies[i + 1..] {
            let house_a = house_number(chart.positions[&a].sign, asc_sign);
            let house_b = house_number(chart.positions[&b].sign, asc_sign);
            if house_a == house_b {
                aspects.push(Aspect {
                    from_body: a,
                    to_body: Some(b),
                    from_house: house_a,
                    to_house: house_b,
                    kind: AspectKind::Conjunction,
                });
            }
        }
    }

    // Directed drishti, including empty target houses.
    for &body in &bodies {
        let from_house = house_number(chart.positions[&body].sign, asc_sign);
        for &offset in drishti_offsets(body) {
            let to_house = ((from_house as usize - 1 + offset as usize - 1) % 12 + 1) as u8;
            let occupants = chart.occupants_of_house(to_house);
            if occupants.is_empty() {
                aspects.push(Aspect {
                    from_body: body,
                    to_body: None,
                    from_house,
                    to_house,
                    kind: AspectKind::Drishti,
                });
            } else {
                for &target in occupants {
                    aspects.push(Aspect {
                        from_body: body,
                        to_body: Some(target),
                        from_house,
                        to_house,
                        kind: AspectKind::Drishti,
                    });
                }
            }
        }
    }

    aspects
}

#[cfg(test)]
mod tests {
    use super::*;
    use jyotish_ephemeris::{Ephemeris, EphemerisConfig};

    #[test]
    fn test_drishti_offsets() {
        assert_eq!(drishti_offsets(Body::Jupiter), &[5, 7, 9]);
        assert_eq!(drishti_offsets(Body::Mars), &[4, 7, 8]);
        assert_eq!(drishti_offsets(Body::Saturn), &[3, 7, 10]);
        assert_eq!(drishti_offsets(Body::Rahu), &[5, 7, 9]);
        assert_eq!(drishti_offsets(Body::Sun), &[7]);
        assert_eq!(drishti_offsets(Body::Moon), &[7]);
    }

    #[test]
    fn test_aspect_counts() {
        let eph = Ephemeris::new(EphemerisConfig::default());
        let chart = Chart::build(&eph, 2_451_545.0, 22.57, 88.36).unwrap();
        let aspects = compute_aspects(&chart);

        // Drishti entries: one per (body, offset, occupant-or-empty).
        let drishti: Vec<_> = aspects
            .iter()
            .filter(|a| a.kind == AspectKind::Drishti)
            .collect();
        // Nine bodies each cast at least one aspect.
        assert!(drishti.len() >= 9);

        // Every target house is within 1..12 and differs per the offset rule.
        for aspect in &drishti {
            assert!((1..=12).contains(&aspect.to_house));
            assert!((1..=12).contains(&aspect.from_house));
        }

        // Conjunction pairs are unordered and share a house.
        for aspect in aspects.iter().filter(|a| a.kind == AspectKind::Conjunction) {
            assert_eq!(aspect.from_house, aspect.to_house);
            assert!(aspect.to_body.is_some());
        }
    }

    #[test]
    fn test_seventh_house_wraps() {
        // A body in house 8 casts its 7th onto house 2.
        let to = ((8usize - 1 + 7 - 1) % 12 + 1) as u8;
        assert_eq!(to, 2);
    }
}
