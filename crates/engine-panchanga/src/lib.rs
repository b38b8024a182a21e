//! Panchanga Engine
//!
//! The five limbs of Vedic time — Tithi, Nakshatra, Yoga, Karana, Vara —
//! plus paksha, ritu, lunar month, sun times, sidereal time, and the
//! Vimshottari dasha tree.

pub mod calendar;
pub mod dasha;
pub mod limbs;
pub mod suntimes;

pub use calendar::{compute_panchang, Panchang, Vara};
pub use dasha::{
    build_dasha_tree, current_period, upcoming_transitions, CurrentPeriod, DashaLevel, DashaNode,
};
pub use limbs::{Karana, MoonNakshatra, Paksha, Tithi, Yoga};
pub use suntimes::{sun_times, SunTimes};
