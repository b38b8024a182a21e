//! Whole-sign houses and the assembled chart

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use jyotish_core::{Ascendant, Body, JyotishError, PlanetaryPosition, ZodiacSign};
use jyotish_ephemeris::{Ephemeris, Zodiac};

use crate::ascendant::sidereal_ascendant;
use crate::navamsa::NavamsaChart;

/// One whole-sign house.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct House {
    /// Ordinal 1..12, counted from the ascendant sign.
    pub number: u8,
    pub sign: ZodiacSign,
    pub sign_lord: Body,
    pub occupants: Vec<Body>,
}

/// A complete sidereal chart at one instant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chart {
    pub julian_day: f64,
    pub ayanamsa: f64,
    pub positions: BTreeMap<Body, PlanetaryPosition>,
    pub ascendant: Ascendant,
    pub houses: Vec<House>,
    pub navamsa: NavamsaChart,
}

/// House number of a body: sign distance from the ascendant sign plus one.
pub fn house_number(body_sign: ZodiacSign, asc_sign: ZodiacSign) -> u8 {
    (((body_sign.index() + 12 - asc_sign.index()) % 12) + 1) as u8
}

impl Chart {
    /// Build the chart for an instant and observer.
    pub fn build(
        ephemeris: &Ephemeris,
        jd: f64,
        latitude: f64,
        longitude: f64,
    ) -> Result<Chart, JyotishError> {
        let ascendant = sidereal_ascendant(jd, latitude, longitude)?;
        let states = ephemeris.positions(jd, Zodiac::Sidereal)?;

        let mut positions = BTreeMap::new();
        for (body, state) in states {
            positions.insert(
                body,
                PlanetaryPosition::from_sidereal(body, state.longitude, state.latitude, state.speed),
            );
        }

        let houses = build_houses(&ascendant, &positions);
        let navamsa = NavamsaChart::project(&ascendant, &positions);

        Ok(Chart {
            julian_day: jd,
            ayanamsa: ephemeris.ayanamsa(jd),
            positions,
            ascendant,
            houses,
            navamsa,
        })
    }

    /// House number a body occupies.
    pub fn house_of(&self, body: Body) -> Option<u8> {
        self.positions
            .get(&body)
            .map(|p| house_number(p.sign, self.ascendant.sign))
    }

    pub fn position(&self, body: Body) -> Option<&PlanetaryPosition> {
        self.positions.get(&body)
    }

    pub fn occupants_of_house(&self, number: u8) -> &[Body] {
        self.houses
            .get((number as usize).wrapping_sub(1))
            .map(|h| h.occupants.as_slice())
            .unwrap_or(&[])
    }
}

fn build_houses(
    ascendant: &Ascendant,
    positions: &BTreeMap<Body, PlanetaryPosition>,
) -> Vec<House> {
    (1..=12u8)
        .map(|number| {
            let sign = ZodiacSign::from_index(ascendant.sign.index() + number as usize - 1);
            let occupants = positions
                .iter()
                .filter(|(_, p)| house_number(p.sign, ascendant.sign) == number)
                .map(|(body, _)| *body)
                .collect();
            House {
                number,
                sign,
                sign_lord: sign.lord(),
                occupants,
            }
        })
        .collect()
}
