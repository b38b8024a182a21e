//! Navamsa (D9) — the ninth divisional chart
//!
//! Each sign splits into nine 3°20' arcs. The navamsa sequence starts from
//! Aries for fire signs, Capricorn for earth, Libra for air, and Cancer for
//! water, advancing one sign per arc.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use jyotish_core::{norm_deg, Ascendant, Body, Element, PlanetaryPosition, ZodiacSign};

/// Arc of one navamsa: 3°20'.
const NAVAMSA_ARC: f64 = 30.0 / 9.0;

/// Navamsa sign for a sidereal longitude.
pub fn navamsa_sign(longitude: f64) -> ZodiacSign {
    let longitude = norm_deg(longitude);
    let sign = ZodiacSign::from_degree(longitude);
    let degree_in_sign = longitude % 30.0;
    let navamsa_index = ((degree_in_sign / NAVAMSA_ARC) as usize).min(8);

    let start = match sign.element() {
        Element::Fire => 0,  // Aries
        Element::Earth => 9, // Capricorn
        Element::Air => 6,   // Libra
        Element::Water => 3, // Cancer
    };
    ZodiacSign::from_index(start + navamsa_index)
}

/// Degree within the navamsa sign: the position inside the 3°20' arc,
/// scaled up nine-fold.
pub fn navamsa_degree(longitude: f64) -> f64 {
    (norm_deg(longitude) % NAVAMSA_ARC) * 9.0
}

/// A body's place in the D9 chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavamsaPosition {
    pub body: Body,
    pub sign: ZodiacSign,
    pub degree_in_sign: f64,
    /// Same sign in D1 and D9.
    pub is_vargottama: bool,
}

/// The D9 projection of a chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavamsaChart {
    pub ascendant_sign: ZodiacSign,
    pub positions: Vec<NavamsaPosition>,
}

impl NavamsaChart {
    pub fn project(
        ascendant: &Ascendant,
        positions: &BTreeMap<Body, PlanetaryPosition>,
    ) -> NavamsaChart {
        let projected = positions
            .values()
            .map(|p| {
                let sign = navamsa_sign(p.longitude);
                NavamsaPosition {
                    body: p.body,
                    sign,
                    degree_in_sign: navamsa_degree(p.longitude),
                    is_vargottama: sign == p.sign,
                }
            })
            .collect();
        NavamsaChart {
            ascendant_sign: navamsa_sign(ascendant.longitude),
            positions: projected,
        }
    }
}
