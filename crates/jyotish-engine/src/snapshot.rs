//! Legacy planetary snapshot strings
//!
//! Older chart records serialise positions as `"Gemini 18.08°"` or
//! `"Libra 1.08° (Chitra)"`. The typed `PlanetaryPosition` is canonical;
//! these strings exist only at the storage boundary and are parsed or
//! emitted here, nowhere else.

use serde::{Deserialize, Serialize};

use jyotish_core::{JyotishError, PlanetaryPosition, ZodiacSign};

/// A position recovered from a legacy snapshot string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotPosition {
    pub sign: ZodiacSign,
    pub degree_in_sign: f64,
    /// Sidereal longitude reconstructed from sign and degree.
    pub longitude: f64,
    pub nakshatra: Option<String>,
}

/// Emit the legacy form, nakshatra included.
pub fn emit_snapshot(position: &PlanetaryPosition) -> String {
    format!(
        "{} {:.2}° ({})",
        position.sign, position.degree_in_sign, position.nakshatra_name
    )
}

/// Parse `"<Sign> <deg>°"` with an optional trailing `"(<Nakshatra>)"`.
pub fn parse_snapshot(text: &str) -> Result<SnapshotPosition, JyotishError> {
    let trimmed = text.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let sign_text = parts.next().unwrap_or_default();
    let rest = parts
        .next()
        .ok_or_else(|| JyotishError::InvalidDateTime(format!("bad snapshot '{text}'")))?;

    let sign = ZodiacSign::ALL
        .iter()
        .find(|s| s.to_string().eq_ignore_ascii_case(sign_text))
        .copied()
        .ok_or_else(|| {
            JyotishError::InvalidDateTime(format!("unknown sign in snapshot '{text}'"))
        })?;

    let (degree_text, nakshatra) = match rest.split_once('(') {
        Some((degrees, tail)) => {
            let name = tail.trim_end().trim_end_matches(')').trim();
            (degrees.trim(), Some(name.to_string()))
        }
        None => (rest.trim(), None),
    };

    let degree_in_sign: f64 = degree_text
        .trim_end_matches('°')
        .trim()
        .parse()
        .map_err(|_| JyotishError::InvalidDateTime(format!("bad degrees in snapshot '{text}'")))?;
    if !(0.0..30.0).contains(&degree_in_sign) {
        return Err(JyotishError::InvalidDateTime(format!(
            "snapshot degree {degree_in_sign} outside [0, 30)"
        )));
    }

    Ok(SnapshotPosition {
        sign,
        degree_in_sign,
        longitude: sign.index() as f64 * 30.0 + degree_in_sign,
        nakshatra,
    })
}
