//! Jyotish Core — shared types for the sidereal calculation engine platform
//!
//! Every engine crate builds on the vocabulary defined here: zodiac signs,
//! bodies (grahas), nakshatra tables, angle arithmetic, and the unified
//! error taxonomy.

pub mod angle;
pub mod error;
pub mod types;

pub use angle::*;
pub use error::*;
pub use types::*;
