//! The `Ephemeris` handle
//!
//! Zodiac mode is passed to every call and applied at the call boundary;
//! the engine itself holds no mutable state, so the sidereal/tropical
//! discipline required of process-global ephemeris libraries is satisfied
//! by construction. Speeds come from central differences half a day to
//! either side.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use jyotish_core::{norm_deg, signed_delta, Body, JyotishError};

use crate::ayanamsa::ayanamsa;
use crate::kepler;
use crate::lunisolar;

/// Supported Julian Day range, roughly 1000-3000 CE. The Keplerian rates
/// and truncated lunar series degrade beyond it.
const JD_MIN: f64 = 2_086_295.0;
const JD_MAX: f64 = 2_816_795.0;

/// Which zodiac the returned longitudes are measured in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zodiac {
    Tropical,
    Sidereal,
}

/// Static engine configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EphemerisConfig {
    /// Directory of high-precision ephemeris data files. The analytic
    /// engine has no reader for them; a set path only changes the warning.
    pub data_path: Option<String>,
}

/// One body's ecliptic state at an instant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EclipticState {
    /// Ecliptic longitude in degrees, [0, 360).
    pub longitude: f64,
    /// Ecliptic latitude in degrees.
    pub latitude: f64,
    /// Daily motion in longitude, degrees/day.
    pub speed: f64,
    /// True when produced by the analytic (low-precision) backend.
    pub approximate: bool,
}

/// Stateless analytic ephemeris engine.
#[derive(Debug)]
pub struct Ephemeris {
    config: EphemerisConfig,
}

impl Ephemeris {
    pub fn new(config: EphemerisConfig) -> Self {
        match &config.data_path {
            Some(path) if !std::path::Path::new(path).exists() => {
                warn!(%path, "ephemeris data files not found; running in analytic (approximate) mode");
            }
            Some(path) => {
                warn!(%path, "high-precision data files are not supported by this build; running in analytic (approximate) mode");
            }
            None => {
                warn!("no ephemeris data files configured; running in analytic (approximate) mode");
            }
        }
        Self { config }
    }

    pub fn config(&self) -> &EphemerisConfig {
        &self.config
    }

    /// Ayanamsa in degrees at a Julian Day.
    pub fn ayanamsa(&self, jd: f64) -> f64 {
        ayanamsa(jd)
    }

    /// Ecliptic state of one body. The trans-Saturnians exist only in the
    /// tropical frame; asking for them sidereally is a contract violation.
    pub fn body_state(
        &self,
        jd: f64,
        body: Body,
        zodiac: Zodiac,
    ) -> Result<EclipticState, JyotishError> {
        check_jd(jd)?;
        if zodiac == Zodiac::Sidereal && Body::trans_saturnian().contains(&body) {
            return Err(JyotishError::BodyUnsupported(format!(
                "{body} is computed in the tropical frame only"
            )));
        }

        if body == Body::Ketu {
            let rahu = self.body_state(jd, Body::Rahu, zodiac)?;
            return Ok(EclipticState {
                longitude: norm_deg(rahu.longitude + 180.0),
                latitude: -rahu.latitude,
                speed: -rahu.speed,
                approximate: true,
            });
        }

        let (longitude, latitude) = frame_lonlat(body, jd, zodiac)?;
        let (before, _) = frame_lonlat(body, jd - 0.5, zodiac)?;
        let (after, _) = frame_lonlat(body, jd + 0.5, zodiac)?;
        let speed = signed_delta(after, before);

        Ok(EclipticState {
            longitude,
            latitude,
            speed,
            approximate: true,
        })
    }

    /// The nine grahas of the chart, keyed and ordered by body.
    pub fn positions(
        &self,
        jd: f64,
        zodiac: Zodiac,
    ) -> Result<BTreeMap<Body, EclipticState>, JyotishError> {
        self.states(jd, &Body::sidereal_nine(), zodiac)
    }

    /// States for an arbitrary body set.
    pub fn states(
        &self,
        jd: f64,
        bodies: &[Body],
        zodiac: Zodiac,
    ) -> Result<BTreeMap<Body, EclipticState>, JyotishError> {
        let mut map = BTreeMap::new();
        for &body in bodies {
            map.insert(body, self.body_state(jd, body, zodiac)?);
        }
        Ok(map)
    }
}

fn check_jd(jd: f64) -> Result<(), JyotishError> {
    // The half-day speed stencil must stay inside the supported range too.
    if !jd.is_finite() || !(JD_MIN + 1.0..=JD_MAX - 1.0).contains(&jd) {
        return Err(JyotishError::EphemerisUnavailable(format!(
            "jd {jd} outside supported range [{JD_MIN}, {JD_MAX}]"
        )));
    }
    Ok(())
}

/// Tropical longitude/latitude of a primary body (everything but Ketu).
fn tropical_lonlat(body: Body, jd: f64) -> Result<(f64, f64), JyotishError> {
    match body {
        Body::Sun => Ok((lunisolar::sun_longitude(jd), 0.0)),
        Body::Moon => Ok((lunisolar::moon_longitude(jd), lunisolar::moon_latitude(jd))),
        Body::Rahu => Ok((lunisolar::mean_node(jd), 0.0)),
        other => kepler::geocentric(other, jd).ok_or_else(|| {
            JyotishError::BodyUnsupported(format!("{other} has no analytic model"))
        }),
    }
}

fn frame_lonlat(body: Body, jd: f64, zodiac: Zodiac) -> Result<(f64, f64), JyotishError> {
    let (lon, lat) = tropical_lonlat(body, jd)?;
    let lon = match zodiac {
        Zodiac::Tropical => lon,
        Zodiac::Sidereal => norm_deg(lon - ayanamsa(jd) + 360.0),
    };
    Ok((lon, lat))
}
