//! Aggregate statistics over a correlation batch

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::scoring::Correlation;

/// Count and mean score for one grouping key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroupBreakdown {
    pub count: usize,
    pub average_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrelationStatistics {
    pub average_score: f64,
    /// Correlations scoring above 0.6.
    pub strong: usize,
    /// Correlations scoring in [0.3, 0.6].
    pub moderate: usize,
    /// Correlations scoring below 0.3.
    pub weak: usize,
    pub per_category: BTreeMap<String, GroupBreakdown>,
    pub per_impact: BTreeMap<String, GroupBreakdown>,
    /// Pattern kinds by contribution count, most frequent first.
    pub top_pattern_kinds: Vec<(String, usize)>,
}

/// Summarise a correlation batch. `top_n` bounds the pattern-kind list.
pub fn statistics(correlations: &[Correlation], top_n: usize) -> CorrelationStatistics {
    let mut strong = 0;
    let mut moderate = 0;
    let mut weak = 0;
    let mut sum = 0.0;
    let mut per_category: BTreeMap<String, (usize, f64)> = BTreeMap::new();
    let mut per_impact: BTreeMap<String, (usize, f64)> = BTreeMap::new();
    let mut kind_counts: BTreeMap<String, usize> = BTreeMap::new();

    for correlation in correlations {
        let score = correlation.overall_score;
        sum += score;
        if score > 0.6 {
            strong += 1;
        } else if score >= 0.3 {
            moderate += 1;
        } else {
            weak += 1;
        }

        let category = correlation.event.category.as_str().to_string();
        let entry = per_category.entry(category).or_default();
        entry.0 += 1;
        entry.1 += score;

        let impact = correlation.event.impact_level.to_string();
        let entry = per_impact.entry(impact).or_default();
        entry.0 += 1;
        entry.1 += score;

        for contribution in &correlation.contributions {
            *kind_counts
                .entry(contribution.pattern.kind_name().to_string())
                .or_default() += 1;
        }
    }

    let average_score = if correlations.is_empty() {
        0.0
    } else {
        sum / correlations.len() as f64
    };

    let mut top_pattern_kinds: Vec<(String, usize)> = kind_counts.into_iter().collect();
    top_pattern_kinds.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    top_pattern_kinds.truncate(top_n);

    CorrelationStatistics {
        average_score,
        strong,
        moderate,
        weak,
        per_category: fold_breakdown(per_category),
        per_impact: fold_breakdown(per_impact),
        top_pattern_kinds,
    }
}

fn fold_breakdown(raw: BTreeMap<String, (usize, f64)>) -> BTreeMap<String, GroupBreakdown> {
    raw.into_iter()
        .map(|(key, (count, sum))| {
            (
                key,
                GroupBreakdown {
                    count,
                    average_score: if count == 0 { 0.0 } else { sum / count as f64 },
                },
            )
        })
        .collect()
}
