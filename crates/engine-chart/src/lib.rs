//! Chart Engine — sidereal birth charts
//!
//! Consumes ephemeris positions and an observer to build the full chart:
//! ascendant, twelve whole-sign houses with occupancy, the navamsa (D9)
//! projection, Vedic aspects, and simplified planetary strength.

pub mod ascendant;
pub mod aspects;
pub mod houses;
pub mod navamsa;
pub mod strength;

pub use ascendant::{local_sidereal_time, obliquity, sidereal_ascendant, tropical_ascendant};
pub use aspects::{compute_aspects, drishti_offsets, Aspect, AspectKind};
pub use houses::{house_number, Chart, House};
pub use navamsa::{navamsa_degree, navamsa_sign, NavamsaChart, NavamsaPosition};
pub use strength::{assess_strength, exaltation, StrengthAssessment};
