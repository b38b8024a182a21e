//! Forward-looking category risk
//!
//! Detects patterns in a 30-day window either side of the target date and
//! folds them into per-category risk with the same affinity table as the
//! correlator, distance-weighted towards the target.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use engine_patterns::{detect, CancelToken, DetectOptions, Pattern};
use jyotish_core::JyotishError;
use jyotish_ephemeris::Ephemeris;

use crate::events::Category;
use crate::scoring::affinity_lookup;

const PREDICTION_WINDOW_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Projected risk for one category at the target date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRisk {
    /// Clamped to [0, 1].
    pub risk: f64,
    /// min(0.9, 0.1 x contributing pattern count).
    pub confidence: f64,
    pub level: RiskLevel,
    /// Type keys of the patterns that contributed, sweep order.
    pub contributing_patterns: Vec<String>,
}

/// Project per-category risk for a target date.
pub fn predict(
    ephemeris: &Ephemeris,
    target_date: NaiveDate,
    categories: &[Category],
    cancel: Option<CancelToken>,
) -> Result<BTreeMap<Category, CategoryRisk>, JyotishError> {
    let start = target_date - Duration::days(PREDICTION_WINDOW_DAYS);
    let end = target_date + Duration::days(PREDICTION_WINDOW_DAYS);
    let scan = detect(ephemeris, start, end, &DetectOptions { cancel })?;
    if scan.partial {
        // A truncated scan would understate risk; refuse instead.
        return Err(JyotishError::Cancelled);
    }

    let mut out = BTreeMap::new();
    for &category in categories {
        out.insert(category, category_risk(category, target_date, &scan.patterns));
    }
    Ok(out)
}

fn category_risk(category: Category, target: NaiveDate, patterns: &[Pattern]) -> CategoryRisk {
    let mut risk = 0.0;
    let mut contributing = Vec::new();

    for pattern in patterns {
        let distance = (pattern.date - target).num_days().abs() as f64;
        if distance > PREDICTION_WINDOW_DAYS as f64 {
            continue;
        }
        let type_key = pattern.type_key();
        // Only pairs with an explicit affinity drive risk: background
        // patterns (fast-body critical degrees, routine yogas) would
        // otherwise saturate every category.
        let Some((base, _, _)) = affinity_lookup(category, &type_key) else {
            continue;
        };
        let contribution = base * (PREDICTION_WINDOW_DAYS as f64 - distance)
            / PREDICTION_WINDOW_DAYS as f64;
        if contribution > 0.0 {
            risk += contribution;
            contributing.push(type_key);
        }
    }

    let risk = risk.clamp(0.0, 1.0);
    let confidence = (0.1 * contributing.len() as f64).min(0.9);
    let level = if risk >= 0.7 {
        RiskLevel::High
    } else if risk >= 0.4 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    };

    CategoryRisk {
        risk,
        confidence,
        level,
        contributing_patterns: contributing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_patterns::PatternKind;
    use jyotish_core::{Body, Significance};

    fn pattern_on(date: NaiveDate) -> Pattern {
        Pattern::new(
            date,
            PatternKind::OuterConjunction {
                first: Body::Saturn,
                second: Body::Pluto,
                separation: 1.0,
            },
            Significance::Extreme,
            1.0,
            true,
        )
    }

    #[test]
    fn test_no_patterns_means_zero_risk() {
        let target = NaiveDate::from_ymd_opt(2030, 6, 1).unwrap();
        let risk = category_risk(Category::Financial, target, &[]);
        assert_eq!(risk.risk, 0.0);
        assert!(risk.confidence <= 0.1);
        assert_eq!(risk.level, RiskLevel::Low);
        assert!(risk.contributing_patterns.is_empty());
    }

    #[test]
    fn test_distance_weighting() {
        let target = NaiveDate::from_ymd_opt(2020, 3, 1).unwrap();
        // On-target pattern contributes its full base.
        let near = category_risk(Category::Pandemic, target, &[pattern_on(target)]);
        // A pattern 15 days out contributes half.
        let far = category_risk(
            Category::Pandemic,
            target,
            &[pattern_on(target - Duration::days(15))],
        );
        assert!((near.risk - 0.8).abs() < 1e-9);
        assert!((far.risk - 0.4).abs() < 1e-9);
        assert_eq!(near.level, RiskLevel::High);
        assert_eq!(far.level, RiskLevel::Medium);
    }

    #[test]
    fn test_confidence_caps_at_point_nine() {
        let target = NaiveDate::from_ymd_opt(2020, 3, 1).unwrap();
        let patterns: Vec<Pattern> = (0..12)
            .map(|i| pattern_on(target + Duration::days(i - 6)))
            .collect();
        let risk = category_risk(Category::Pandemic, target, &patterns);
        assert_eq!(risk.confidence, 0.9);
        assert_eq!(risk.risk, 1.0); // clamped
    }

    #[test]
    fn test_predict_end_to_end_quiet_window() {
        use jyotish_ephemeris::EphemerisConfig;
        // A window chosen with no watched outer-planet pattern nearby still
        // returns an entry per requested category with bounded values.
        let eph = Ephemeris::new(EphemerisConfig::default());
        let target = NaiveDate::from_ymd_opt(2024, 9, 15).unwrap();
        let risks = predict(&eph, target, &[Category::Financial, Category::War], None).unwrap();
        assert_eq!(risks.len(), 2);
        for risk in risks.values() {
            assert!((0.0..=1.0).contains(&risk.risk));
            assert!((0.0..=0.9).contains(&risk.confidence));
        }
    }
}
