//! The external event store's row model
//!
//! The store itself is an external collaborator; the core only defines the
//! typed row shape, validates enum text at the boundary, and reads through
//! the `EventSource` trait. Enum sets are closed at type-definition time:
//! unknown text is a row-indexed error, never coerced.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use jyotish_core::JyotishError;

/// Event impact shares the four-step scale used for pattern significance.
pub use jyotish_core::Significance as ImpactLevel;

/// Broad event category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Financial,
    War,
    NaturalDisaster,
    Political,
    Pandemic,
    Terrorism,
    Social,
    Technology,
    Accident,
    Other,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Financial,
        Category::War,
        Category::NaturalDisaster,
        Category::Political,
        Category::Pandemic,
        Category::Terrorism,
        Category::Social,
        Category::Technology,
        Category::Accident,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Financial => "financial",
            Category::War => "war",
            Category::NaturalDisaster => "natural_disaster",
            Category::Political => "political",
            Category::Pandemic => "pandemic",
            Category::Terrorism => "terrorism",
            Category::Social => "social",
            Category::Technology => "technology",
            Category::Accident => "accident",
            Category::Other => "other",
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .find(|c| c.as_str() == text)
            .copied()
            .ok_or_else(|| format!("unknown category '{text}'"))
    }
}

/// Narrower event type. The set has grown historically; it stays explicit
/// here so new rows must extend the type, not smuggle in freeform text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    MarketCrash,
    Recession,
    CurrencyCrisis,
    WarOutbreak,
    Ceasefire,
    Earthquake,
    Flood,
    Hurricane,
    Wildfire,
    Election,
    Coup,
    Assassination,
    PandemicOutbreak,
    TerroristAttack,
    Protest,
    TechMilestone,
    IndustrialAccident,
    TransportAccident,
    Other,
}

impl EventType {
    pub const ALL: [EventType; 19] = [
        EventType::MarketCrash,
        EventType::Recession,
        EventType::CurrencyCrisis,
        EventType::WarOutbreak,
        EventType::Ceasefire,
        EventType::Earthquake,
        EventType::Flood,
        EventType::Hurricane,
        EventType::Wildfire,
        EventType::Election,
        EventType::Coup,
        EventType::Assassination,
        EventType::PandemicOutbreak,
        EventType::TerroristAttack,
        EventType::Protest,
        EventType::TechMilestone,
        EventType::IndustrialAccident,
        EventType::TransportAccident,
        EventType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::MarketCrash => "market_crash",
            EventType::Recession => "recession",
            EventType::CurrencyCrisis => "currency_crisis",
            EventType::WarOutbreak => "war_outbreak",
            EventType::Ceasefire => "ceasefire",
            EventType::Earthquake => "earthquake",
            EventType::Flood => "flood",
            EventType::Hurricane => "hurricane",
            EventType::Wildfire => "wildfire",
            EventType::Election => "election",
            EventType::Coup => "coup",
            EventType::Assassination => "assassination",
            EventType::PandemicOutbreak => "pandemic_outbreak",
            EventType::TerroristAttack => "terrorist_attack",
            EventType::Protest => "protest",
            EventType::TechMilestone => "tech_milestone",
            EventType::IndustrialAccident => "industrial_accident",
            EventType::TransportAccident => "transport_accident",
            EventType::Other => "other",
        }
    }
}

impl FromStr for EventType {
    type Err = String;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        EventType::ALL
            .iter()
            .find(|t| t.as_str() == text)
            .copied()
            .ok_or_else(|| format!("unknown event type '{text}'"))
    }
}

fn impact_from_str(text: &str) -> Result<ImpactLevel, String> {
    match text {
        "low" => Ok(ImpactLevel::Low),
        "medium" => Ok(ImpactLevel::Medium),
        "high" => Ok(ImpactLevel::High),
        "extreme" => Ok(ImpactLevel::Extreme),
        other => Err(format!("unknown impact level '{other}'")),
    }
}

/// One row of the external event table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub event_date: DateTime<Utc>,
    pub category: Category,
    pub event_type: EventType,
    pub impact_level: ImpactLevel,
    pub location_name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub country_code: Option<String>,
    pub affected_population: Option<i64>,
    pub source_url: Option<String>,
    pub source_name: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Event {
    /// Coordinate constraint: both null, or both present and valid.
    pub fn validate(&self) -> Result<(), JyotishError> {
        match (self.latitude, self.longitude) {
            (None, None) => Ok(()),
            (Some(lat), Some(lon)) => {
                if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon) {
                    Ok(())
                } else {
                    Err(JyotishError::CoordinatesOutOfRange(format!(
                        "event {}: lat {lat}, lon {lon}",
                        self.id
                    )))
                }
            }
            _ => Err(JyotishError::EventStoreError(format!(
                "event {}: latitude and longitude must both be set or both be null",
                self.id
            ))),
        }
    }
}

/// Validate the enum columns of one seed row. Errors carry the row index
/// so a bad CSV line is pinpointed instead of silently coerced.
pub fn validate_seed_row(
    row_index: usize,
    category: &str,
    event_type: &str,
    impact_level: &str,
) -> Result<(Category, EventType, ImpactLevel), JyotishError> {
    let category = Category::from_str(category)
        .map_err(|e| JyotishError::EventStoreError(format!("row {row_index}: {e}")))?;
    let event_type = EventType::from_str(event_type)
        .map_err(|e| JyotishError::EventStoreError(format!("row {row_index}: {e}")))?;
    let impact = impact_from_str(impact_level)
        .map_err(|e| JyotishError::EventStoreError(format!("row {row_index}: {e}")))?;
    Ok((category, event_type, impact))
}

/// Read-only access to the externally-owned event table. Reads are
/// fallible; a failure surfaces as `EventStoreError` and is never retried
/// by the core.
pub trait EventSource {
    fn events(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Event>, JyotishError>;
}

/// Events held in memory, mainly for tests and seeded fixtures.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEventSource {
    rows: Vec<Event>,
}

impl InMemoryEventSource {
    pub fn new(rows: Vec<Event>) -> Self {
        Self { rows }
    }
}

impl EventSource for InMemoryEventSource {
    fn events(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Event>, JyotishError> {
        Ok(self
            .rows
            .iter()
            .filter(|e| e.event_date >= start && e.event_date <= end)
            .cloned()
            .collect())
    }
}
