//! Correlation scoring
//!
//! A pattern contributes to an event only inside its kind's correlation
//! window. The per-pattern score sums four components and caps at 1.0:
//! category affinity (base x weight from the fixed table), time proximity
//! (up to 0.3), a significance bonus, and impact alignment (up to 0.2).
//! The event aggregate is the mean of its contributions.

use chrono::{NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use engine_patterns::Pattern;
use jyotish_core::Significance;

use crate::events::{Category, Event};

/// Correlation window in days per pattern kind name.
pub fn correlation_window_days(kind_name: &str) -> i64 {
    match kind_name {
        "outer-conjunction" => 180,
        "major-aspect" => 60,
        "eclipse" => 30,
        "retrograde-station" => 90,
        "cardinal-ingress" => 120,
        "kala-sarpa" => 90,
        "gandanta" => 45,
        "critical-degree" => 15,
        _ => 30,
    }
}

/// (category, type-key prefix) -> (base score, weight, tag). Missing pairs
/// default to (0.2, 0.8, "general").
const AFFINITY: [(Category, &str, f64, f64, &str); 14] = [
    (Category::Pandemic, "saturn-pluto-conjunction", 0.8, 1.5, "plague-cycle"),
    (Category::Pandemic, "neptune-pluto-conjunction", 0.6, 1.2, "dissolution"),
    (Category::Financial, "jupiter-saturn-conjunction", 0.7, 1.2, "economic-era"),
    (Category::Financial, "saturn-uranus", 0.6, 1.2, "market-shock"),
    (Category::Financial, "retrograde-mercury", 0.5, 1.0, "market-confusion"),
    (Category::Financial, "kala-sarpa", 0.4, 1.0, "collective-distortion"),
    (Category::War, "mars-saturn", 0.7, 1.3, "conflict"),
    (Category::War, "mars-rahu", 0.6, 1.2, "aggression"),
    (Category::Terrorism, "mars-rahu", 0.7, 1.3, "violence"),
    (Category::Political, "solar-eclipse", 0.7, 1.2, "leadership"),
    (Category::Political, "cardinal-ingress", 0.6, 1.1, "mundane-shift"),
    (Category::Social, "lunar-eclipse", 0.6, 1.1, "public-mood"),
    (Category::NaturalDisaster, "gandanta", 0.5, 1.0, "instability"),
    (Category::NaturalDisaster, "uranus-pluto-conjunction", 0.6, 1.2, "upheaval"),
];

const DEFAULT_AFFINITY: (f64, f64, &str) = (0.2, 0.8, "general");

/// Explicit affinity entry for a (category, type key) pair, if one exists.
pub fn affinity_lookup(category: Category, type_key: &str) -> Option<(f64, f64, &'static str)> {
    AFFINITY
        .iter()
        .find(|(cat, prefix, _, _, _)| *cat == category && type_key.starts_with(prefix))
        .map(|(_, _, base, weight, tag)| (*base, *weight, *tag))
}

/// Affinity lookup with the default for unknown pairs.
pub fn affinity(category: Category, type_key: &str) -> (f64, f64, &'static str) {
    affinity_lookup(category, type_key).unwrap_or(DEFAULT_AFFINITY)
}

fn significance_bonus(significance: Significance) -> f64 {
    match significance {
        Significance::Low => 0.05,
        Significance::Medium => 0.10,
        Significance::High => 0.20,
        Significance::Extreme => 0.30,
    }
}

/// One pattern's contribution to one event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternContribution {
    pub pattern: Pattern,
    pub time_difference_days: f64,
    pub category_component: f64,
    pub proximity_component: f64,
    pub significance_bonus: f64,
    pub impact_alignment: f64,
    /// Component sum capped at 1.0.
    pub score: f64,
    pub tag: String,
}

/// All contributions for one event plus the aggregate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Correlation {
    pub event: Event,
    pub contributions: Vec<PatternContribution>,
    /// Mean contribution score, in [0, 1].
    pub overall_score: f64,
}

/// Score one pattern against one event, if within the window.
pub fn score_pattern(event: &Event, pattern: &Pattern) -> Option<PatternContribution> {
    let window = correlation_window_days(pattern.kind_name()) as f64;
    let pattern_instant = Utc.from_utc_datetime(
        &pattern
            .date
            .and_time(NaiveTime::from_hms_opt(0, 0, 0)?),
    );
    let time_difference_days =
        (event.event_date - pattern_instant).num_seconds().abs() as f64 / 86_400.0;
    if time_difference_days > window {
        return None;
    }

    let type_key = pattern.type_key();
    let (base, weight, tag) = affinity(event.category, &type_key);
    let category_component = base * weight;
    let proximity_component = (1.0 - time_difference_days / window).max(0.0) * 0.3;
    let sig_bonus = significance_bonus(pattern.significance);
    let impact_alignment = (1.0
        - (event.impact_level.rank() as f64 - pattern.significance.rank() as f64).abs() / 4.0)
        * 0.2;

    let score = (category_component + proximity_component + sig_bonus + impact_alignment).min(1.0);

    Some(PatternContribution {
        pattern: pattern.clone(),
        time_difference_days,
        category_component,
        proximity_component,
        significance_bonus: sig_bonus,
        impact_alignment,
        score,
        tag: tag.to_string(),
    })
}

/// Correlate every event against every pattern. Output is ordered by
/// overall score descending, ties broken by event date ascending.
pub fn correlate(events: &[Event], patterns: &[Pattern]) -> Vec<Correlation> {
    let mut correlations: Vec<Correlation> = events
        .iter()
        .map(|event| {
            let contributions: Vec<PatternContribution> = patterns
                .iter()
                .filter_map(|pattern| score_pattern(event, pattern))
                .collect();
            let overall_score = if contributions.is_empty() {
                0.0
            } else {
                let sum: f64 = contributions.iter().map(|c| c.score).sum();
                (sum / contributions.len() as f64).clamp(0.0, 1.0)
            };
            Correlation {
                event: event.clone(),
                contributions,
                overall_score,
            }
        })
        .collect();

    correlations.sort_by(|a, b| {
        b.overall_score
            .total_cmp(&a.overall_score)
            .then(a.event.event_date.cmp(&b.event.event_date))
    });
    correlations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{EventType, ImpactLevel};
    use chrono::NaiveDate;
    use engine_patterns::{PatternKind, StationKind};
    use jyotish_core::Body;
    use uuid::Uuid;

    fn event_at(category: Category, impact: ImpactLevel, date: (i32, u32, u32)) -> Event {
        Event {
            id: Uuid::new_v4(),
            title: "test".to_string(),
            description: String::new(),
            event_date: Utc
                .with_ymd_and_hms(date.0, date.1, date.2, 0, 0, 0)
                .unwrap(),
            category,
            event_type: EventType::Other,
            impact_level: impact,
            location_name: None,
            latitude: None,
            longitude: None,
            country_code: None,
            affected_population: None,
            source_url: None,
            source_name: "manual".to_string(),
            created_at: None,
            updated_at: None,
        }
    }

    fn saturn_pluto_on(date: (i32, u32, u32)) -> Pattern {
        Pattern::new(
            NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            PatternKind::OuterConjunction {
                first: Body::Saturn,
                second: Body::Pluto,
                separation: 0.3,
            },
            Significance::Extreme,
            0.3,
            true,
        )
    }

    #[test]
    fn test_pandemic_saturn_pluto_scores_high() {
        // WHO pandemic declaration vs the 2020-01-12 conjunction: 59 days.
        let event = event_at(Category::Pandemic, ImpactLevel::Extreme, (2020, 3, 11));
        let pattern = saturn_pluto_on((2020, 1, 12));
        let contribution = score_pattern(&event, &pattern).unwrap();

        // Base 0.8, weight 1.5 -> capped sum must clear 0.7 comfortably.
        assert!(contribution.category_component > 1.0);
        assert_eq!(contribution.score, 1.0);

        let correlations = correlate(&[event], &[pattern]);
        assert!(correlations[0].overall_score >= 0.7);
    }

    #[test]
    fn test_outside_window_contributes_nothing() {
        let event = event_at(Category::Pandemic, ImpactLevel::Extreme, (2021, 3, 11));
        let pattern = saturn_pluto_on((2020, 1, 12)); // 424 days away
        assert!(score_pattern(&event, &pattern).is_none());
    }

    #[test]
    fn test_unknown_pair_uses_default_affinity() {
        let event = event_at(Category::Technology, ImpactLevel::Low, (2020, 1, 20));
        let pattern = saturn_pluto_on((2020, 1, 12));
        let contribution = score_pattern(&event, &pattern).unwrap();
        assert!((contribution.category_component - 0.16).abs() < 1e-9);
        assert_eq!(contribution.tag, "general");
    }

    #[test]
    fn test_impact_alignment_penalises_mismatch() {
        let aligned = event_at(Category::Pandemic, ImpactLevel::Extreme, (2020, 1, 20));
        let misaligned = event_at(Category::Pandemic, ImpactLevel::Low, (2020, 1, 20));
        let pattern = saturn_pluto_on((2020, 1, 12));
        let a = score_pattern(&aligned, &pattern).unwrap();
        let b = score_pattern(&misaligned, &pattern).unwrap();
        assert!((a.impact_alignment - 0.2).abs() < 1e-9);
        assert!(a.impact_alignment > b.impact_alignment);
    }

    #[test]
    fn test_window_varies_by_kind() {
        // A retrograde station 80 days out is inside its 90-day window.
        let event = event_at(Category::Financial, ImpactLevel::Medium, (2020, 5, 1));
        let station = Pattern::new(
            NaiveDate::from_ymd_opt(2020, 2, 11).unwrap(),
            PatternKind::RetrogradeStation {
                body: Body::Mercury,
                station: StationKind::RetrogradeStart,
                typical_window_days: (20, 24),
            },
            Significance::Medium,
            0.01,
            true,
        );
        assert!(score_pattern(&event, &station).is_some());

        // The same distance is outside an eclipse's 30-day window.
        let eclipse = Pattern::new(
            NaiveDate::from_ymd_opt(2020, 2, 11).unwrap(),
            PatternKind::Eclipse {
                kind: engine_patterns::EclipseKind::Solar,
                elongation: 1.0,
                node_distance: 4.0,
                node_proximity: "rahu".to_string(),
            },
            Significance::High,
            4.0,
            true,
        );
        assert!(score_pattern(&event, &eclipse).is_none());
    }

    #[test]
    fn test_scores_bounded_and_sorted() {
        let events = vec![
            event_at(Category::Pandemic, ImpactLevel::Extreme, (2020, 3, 11)),
            event_at(Category::Technology, ImpactLevel::Low, (2020, 3, 1)),
            event_at(Category::Other, ImpactLevel::Low, (2023, 1, 1)),
        ];
        let patterns = vec![saturn_pluto_on((2020, 1, 12))];
        let correlations = correlate(&events, &patterns);

        for c in &correlations {
            assert!((0.0..=1.0).contains(&c.overall_score));
        }
        for pair in correlations.windows(2) {
            assert!(pair[0].overall_score >= pair[1].overall_score);
        }
        // The event with no contributions scores zero.
        assert_eq!(correlations.last().unwrap().overall_score, 0.0);
    }
}
