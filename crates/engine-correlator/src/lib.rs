//! Correlator Engine
//!
//! Joins detected patterns with an externally-owned event set: per-event
//! correlation scores built from category affinity, temporal proximity,
//! significance, and impact alignment, plus aggregate statistics and a
//! forward-looking category risk projection.

pub mod events;
pub mod predict;
pub mod scoring;
pub mod statistics;

pub use events::{
    validate_seed_row, Category, Event, EventSource, EventType, ImpactLevel, InMemoryEventSource,
};
pub use predict::{predict, CategoryRisk, RiskLevel};
pub use scoring::{correlate, correlation_window_days, Correlation, PatternContribution};
pub use statistics::{statistics, CorrelationStatistics, GroupBreakdown};
