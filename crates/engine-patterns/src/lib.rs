//! Pattern Engine — named planetary configurations over date ranges
//!
//! Sweeps a closed date interval at kind-specific cadences and emits typed
//! pattern records: outer-planet conjunctions, major aspects, eclipses,
//! retrograde stations, cardinal ingresses, Kala Sarpa, gandanta, and
//! critical degrees. Per-day failures are logged and skipped; a sweep never
//! fails on a single day.

pub mod detector;
pub mod scans;
pub mod types;

pub use detector::{detect, CancelToken, DetectOptions, PatternScan, ScanSummary};
pub use types::{
    AspectType, EclipseKind, KalaSarpaKind, Pattern, PatternKind, StationKind,
};
