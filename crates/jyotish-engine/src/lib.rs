//! Jyotish Engine — the library surface
//!
//! One handle exposing the six core operations, independent of any wire
//! protocol: `compute_chart`, `compute_calendar`, `compute_dasha`,
//! `detect_patterns`, `correlate`, and `predict`. HTTP routes, persistence,
//! and interpretation layers are external collaborators.

pub mod ops;
pub mod snapshot;

pub use ops::{
    CalendarRequest, ChartRequest, ChartResult, CorrelationResult, JyotishEngine,
};
pub use snapshot::{emit_snapshot, parse_snapshot, SnapshotPosition};

pub use engine_chart::{Aspect, AspectKind, Chart, House, NavamsaChart, StrengthAssessment};
pub use engine_correlator::{
    Category, Correlation, CorrelationStatistics, Event, EventSource, EventType, ImpactLevel,
    InMemoryEventSource,
};
pub use engine_panchanga::{
    current_period, upcoming_transitions, CurrentPeriod, DashaLevel, DashaNode, Panchang,
};
pub use engine_patterns::{CancelToken, DetectOptions, Pattern, PatternKind, PatternScan};
pub use jyotish_core::{
    Ascendant, Body, Dignity, JyotishError, PlanetaryPosition, Significance, ZodiacSign,
};
pub use jyotish_ephemeris::{EclipticState, Ephemeris, EphemerisConfig, Zodiac};
pub use jyotish_time::{OffsetSource, Resolution};
