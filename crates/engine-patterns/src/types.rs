//! Typed pattern records
//!
//! Every detected configuration is one tagged variant with its specific
//! payload, so downstream lookups are compile-checked instead of keyed by
//! synthesized strings.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use jyotish_core::{Body, Significance, ZodiacSign};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectType {
    Conjunction,
    Opposition,
    Square,
    Trine,
    Sextile,
}

impl AspectType {
    pub fn angle(&self) -> f64 {
        match self {
            AspectType::Conjunction => 0.0,
            AspectType::Opposition => 180.0,
            AspectType::Square => 90.0,
            AspectType::Trine => 120.0,
            AspectType::Sextile => 60.0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AspectType::Conjunction => "conjunction",
            AspectType::Opposition => "opposition",
            AspectType::Square => "square",
            AspectType::Trine => "trine",
            AspectType::Sextile => "sextile",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EclipseKind {
    Solar,
    Lunar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StationKind {
    RetrogradeStart,
    RetrogradeEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KalaSarpaKind {
    /// All seven classical planets inside the Rahu..Rahu+180 arc.
    Classic,
    /// All seven outside it.
    Reverse,
}

/// Kind-specific payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum PatternKind {
    OuterConjunction {
        first: Body,
        second: Body,
        separation: f64,
    },
    MajorAspect {
        first: Body,
        second: Body,
        aspect: AspectType,
        separation: f64,
    },
    Eclipse {
        kind: EclipseKind,
        elongation: f64,
        node_distance: f64,
        node_proximity: String,
    },
    RetrogradeStation {
        body: Body,
        station: StationKind,
        typical_window_days: (u16, u16),
    },
    CardinalIngress {
        body: Body,
        from_sign: ZodiacSign,
        to_sign: ZodiacSign,
    },
    KalaSarpa {
        kind: KalaSarpaKind,
    },
    Gandanta {
        body: Body,
        longitude: f64,
    },
    CriticalDegree {
        body: Body,
        sign: ZodiacSign,
        degree: u8,
    },
}

impl PatternKind {
    /// Stable kind name, used for merge ordering and summary counting.
    pub fn kind_name(&self) -> &'static str {
        match self {
            PatternKind::OuterConjunction { .. } => "outer-conjunction",
            PatternKind::MajorAspect { .. } => "major-aspect",
            PatternKind::Eclipse { .. } => "eclipse",
            PatternKind::RetrogradeStation { .. } => "retrograde-station",
            PatternKind::CardinalIngress { .. } => "cardinal-ingress",
            PatternKind::KalaSarpa { .. } => "kala-sarpa",
            PatternKind::Gandanta { .. } => "gandanta",
            PatternKind::CriticalDegree { .. } => "critical-degree",
        }
    }

    /// Fine-grained key identifying the concrete configuration, e.g.
    /// `saturn-pluto-conjunction` or `retrograde-mercury`. The correlator's
    /// affinity table is keyed on these.
    pub fn type_key(&self) -> String {
        fn slug(body: &Body) -> String {
            body.to_string().to_lowercase()
        }
        match self {
            PatternKind::OuterConjunction { first, second, .. } => {
                format!("{}-{}-conjunction", slug(first), slug(second))
            }
            PatternKind::MajorAspect { first, second, aspect, .. } => {
                format!("{}-{}-{}", slug(first), slug(second), aspect.name())
            }
            PatternKind::Eclipse { kind: EclipseKind::Solar, .. } => "solar-eclipse".to_string(),
            PatternKind::Eclipse { kind: EclipseKind::Lunar, .. } => "lunar-eclipse".to_string(),
            PatternKind::RetrogradeStation { body, .. } => format!("retrograde-{}", slug(body)),
            PatternKind::CardinalIngress { body, .. } => {
                format!("cardinal-ingress-{}", slug(body))
            }
            PatternKind::KalaSarpa { kind: KalaSarpaKind::Classic } => "kala-sarpa".to_string(),
            PatternKind::KalaSarpa { kind: KalaSarpaKind::Reverse } => {
                "kala-sarpa-reverse".to_string()
            }
            PatternKind::Gandanta { body, .. } => format!("gandanta-{}", slug(body)),
            PatternKind::CriticalDegree { body, .. } => {
                format!("critical-degree-{}", slug(body))
            }
        }
    }

    /// Fixed keyword set per kind.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            PatternKind::OuterConjunction { .. } => {
                &["power", "structural-change", "era-shift", "institutions"]
            }
            PatternKind::MajorAspect { .. } => &["tension", "conflict", "pressure"],
            PatternKind::Eclipse { .. } => &["eclipse", "disruption", "revelation"],
            PatternKind::RetrogradeStation { .. } => &["reversal", "review", "delay"],
            PatternKind::CardinalIngress { .. } => &["initiation", "season-change", "mundane"],
            PatternKind::KalaSarpa { .. } => &["karmic", "polarization", "collective"],
            PatternKind::Gandanta { .. } => &["junction", "instability", "transition"],
            PatternKind::CriticalDegree { .. } => &["threshold", "urgency"],
        }
    }
}

/// One detected pattern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pattern {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub kind: PatternKind,
    pub significance: Significance,
    pub keywords: Vec<String>,
    /// Orb in degrees for angular patterns; a kind-defined strength
    /// measure otherwise.
    pub orb_or_strength: f64,
    pub is_exact: bool,
}

impl Pattern {
    pub fn new(
        date: NaiveDate,
        kind: PatternKind,
        significance: Significance,
        orb_or_strength: f64,
        is_exact: bool,
    ) -> Pattern {
        let keywords = kind.keywords().iter().map(|k| k.to_string()).collect();
        Pattern {
            date,
            kind,
            significance,
            keywords,
            orb_or_strength,
            is_exact,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        self.kind.kind_name()
    }

    pub fn type_key(&self) -> String {
        self.kind.type_key()
    }
}
