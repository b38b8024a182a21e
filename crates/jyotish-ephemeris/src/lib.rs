//! Jyotish Ephemeris — native analytic planetary positions
//!
//! Keplerian orbital elements (Standish J2000 set) for Mercury through
//! Pluto, Meeus series for the Sun and Moon, and the mean lunar node for
//! Rahu. This is the engine's documented low-precision mode: every state is
//! marked approximate. Zodiac mode is an argument to every call, never
//! process state, so concurrent use cannot observe a stale mode.

pub mod ayanamsa;
pub mod engine;
pub mod kepler;
pub mod lunisolar;

pub use ayanamsa::ayanamsa;
pub use engine::{EclipticState, Ephemeris, EphemerisConfig, Zodiac};
