//! Simplified planetary strength
//!
//! Within 5 degrees of the exaltation point: Exalted. In the exaltation
//! sign or own sign: Strong. In the sign opposite exaltation: Debilitated.
//! Otherwise Medium. Full Shadbala is out of scope.

use serde::{Deserialize, Serialize};

use jyotish_core::{arc_separation, Body, Dignity, PlanetaryPosition, ZodiacSign};

/// Exaltation point: sign and degree within it.
pub fn exaltation(body: Body) -> Option<(ZodiacSign, f64)> {
    match body {
        Body::Sun => Some((ZodiacSign::Aries, 10.0)),
        Body::Moon => Some((ZodiacSign::Taurus, 3.0)),
        Body::Mars => Some((ZodiacSign::Capricorn, 28.0)),
        Body::Mercury => Some((ZodiacSign::Virgo, 15.0)),
        Body::Jupiter => Some((ZodiacSign::Cancer, 5.0)),
        Body::Venus => Some((ZodiacSign::Pisces, 27.0)),
        Body::Saturn => Some((ZodiacSign::Libra, 20.0)),
        _ => None,
    }
}

fn own_signs(body: Body) -> &'static [ZodiacSign] {
    match body {
        Body::Sun => &[ZodiacSign::Leo],
        Body::Moon => &[ZodiacSign::Cancer],
        Body::Mars => &[ZodiacSign::Aries, ZodiacSign::Scorpio],
        Body::Mercury => &[ZodiacSign::Gemini, ZodiacSign::Virgo],
        Body::Jupiter => &[ZodiacSign::Sagittarius, ZodiacSign::Pisces],
        Body::Venus => &[ZodiacSign::Taurus, ZodiacSign::Libra],
        Body::Saturn => &[ZodiacSign::Capricorn, ZodiacSign::Aquarius],
        _ => &[],
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrengthAssessment {
    pub body: Body,
    pub dignity: Dignity,
    pub score: u8,
}

/// Assess a body's strength from its sidereal position.
pub fn assess_strength(position: &PlanetaryPosition) -> StrengthAssessment {
    let dignity = dignity_of(position.body, position.sign, position.longitude);
    StrengthAssessment {
        body: position.body,
        dignity,
        score: dignity.score(),
    }
}

fn dignity_of(body: Body, sign: ZodiacSign, longitude: f64) -> Dignity {
    if let Some((exalt_sign, exalt_degree)) = exaltation(body) {
        let exalt_longitude = exalt_sign.index() as f64 * 30.0 + exalt_degree;
        if arc_separation(longitude, exalt_longitude) <= 5.0 {
            return Dignity::Exalted;
        }
        if sign == exalt_sign {
            return Dignity::Strong;
        }
        // Debilitation sign sits opposite the exaltation sign.
        if sign == ZodiacSign::from_index(exalt_sign.index() + 6) {
            return Dignity::Debilitated;
        }
    }
    if own_signs(body).contains(&sign) {
        return Dignity::Strong;
    }
    Dignity::Medium
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(body: Body, longitude: f64) -> PlanetaryPosition {
        PlanetaryPosition::from_sidereal(body, longitude, 0.0, 1.0)
    }

    #[test]
    fn test_exalted_within_orb() {
        // Sun exalted at 10 Aries; 12 Aries is inside the 5 degree orb.
        let a = assess_strength(&at(Body::Sun, 12.0));
        assert_eq!(a.dignity, Dignity::Exalted);
        assert_eq!(a.score, 100);
    }

    #[test]
    fn test_exaltation_sign_beyond_orb_is_strong() {
        // 28 Aries is in the exaltation sign but past the orb.
        let a = assess_strength(&at(Body::Sun, 28.0));
        assert_eq!(a.dignity, Dignity::Strong);
        assert_eq!(a.score, 75);
    }

    #[test]
    fn test_own_sign_is_strong() {
        // Sun in Leo.
        let a = assess_strength(&at(Body::Sun, 125.0));
        assert_eq!(a.dignity, Dignity::Strong);
    }

    #[test]
    fn test_debilitation() {
        // Sun debilitated in Libra (opposite Aries).
        let a = assess_strength(&at(Body::Sun, 190.0));
        assert_eq!(a.dignity, Dignity::Debilitated);
        assert_eq!(a.score, 0);
    }

    #[test]
    fn test_neutral_sign_is_medium() {
        let a = assess_strength(&at(Body::Sun, 65.0)); // Gemini
        assert_eq!(a.dignity, Dignity::Medium);
        assert_eq!(a.score, 50);
    }

    #[test]
    fn test_nodes_have_no_exaltation() {
        let a = assess_strength(&at(Body::Rahu, 50.0));
        assert_eq!(a.dignity, Dignity::Medium);
    }

    #[test]
    fn test_saturn_exaltation_table() {
        let a = assess_strength(&at(Body::Saturn, 200.0)); // 20 Libra
        assert_eq!(a.dignity, Dignity::Exalted);
    }
}
