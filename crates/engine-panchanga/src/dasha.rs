//! Vimshottari dasha tree
//!
//! The natal Moon's nakshatra fixes the starting lord; the fraction of the
//! nakshatra already traversed fixes how much of that mahadasha has elapsed
//! at birth. The first mahadasha is anchored at its true start (before
//! birth), so every node at every level has its canonical length: a
//! sub-period of lord L inside a period of lord M and length Y spans
//! Y * years(L) / 120.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use jyotish_core::{
    dasha_years, nakshatra_index, nakshatra_lord, norm_deg, Body, NAKSHATRA_ARC, VIMSHOTTARI_LORDS,
};

const YEAR_SECONDS: f64 = 365.25 * 86_400.0;
const FULL_CYCLE_YEARS: f64 = 120.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DashaLevel {
    Mahadasha,
    Antardasha,
    Pratyantardasha,
}

/// One period in the Vimshottari tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashaNode {
    pub lord: Body,
    pub level: DashaLevel,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration_years: f64,
    pub children: Vec<DashaNode>,
}

impl DashaNode {
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.start && at < self.end
    }
}

fn lord_years(lord: Body) -> f64 {
    dasha_years(lord).expect("vimshottari lords always have a period length")
}

fn years_duration(years: f64) -> Duration {
    Duration::seconds((years * YEAR_SECONDS).round() as i64)
}

/// Build the full three-level tree: nine mahadashas, each with nine
/// antardashas, each with nine pratyantardashas.
pub fn build_dasha_tree(
    natal_moon_longitude: f64,
    natal_instant: DateTime<Utc>,
) -> Vec<DashaNode> {
    let moon = norm_deg(natal_moon_longitude);
    let star_index = nakshatra_index(moon);
    let first_lord = nakshatra_lord(star_index);

    let elapsed_fraction = (moon % NAKSHATRA_ARC) / NAKSHATRA_ARC;
    let first_years = lord_years(first_lord);
    let mut start = natal_instant - years_duration(elapsed_fraction * first_years);

    let lord_position = VIMSHOTTARI_LORDS
        .iter()
        .position(|&l| l == first_lord)
        .expect("starting lord is in the cycle");

    let mut tree = Vec::with_capacity(9);
    for step in 0..9 {
        let lord = VIMSHOTTARI_LORDS[(lord_position + step) % 9];
        let years = lord_years(lord);
        let end = start + years_duration(years);
        let children = build_sub_periods(lord, years, start, DashaLevel::Antardasha);
        tree.push(DashaNode {
            lord,
            level: DashaLevel::Mahadasha,
            start,
            end,
            duration_years: years,
            children,
        });
        start = end;
    }
    tree
}

fn build_sub_periods(
    parent_lord: Body,
    parent_years: f64,
    parent_start: DateTime<Utc>,
    level: DashaLevel,
) -> Vec<DashaNode> {
    let parent_position = VIMSHOTTARI_LORDS
        .iter()
        .position(|&l| l == parent_lord)
        .expect("parent lord is in the cycle");

    let mut start = parent_start;
    let mut periods = Vec::with_capacity(9);
    for step in 0..9 {
        let lord = VIMSHOTTARI_LORDS[(parent_position + step) % 9];
        let years = parent_years * lord_years(lord) / FULL_CYCLE_YEARS;
        let end = start + years_duration(years);
        let children = match level {
            DashaLevel::Antardasha => {
                build_sub_periods(lord, years, start, DashaLevel::Pratyantardasha)
            }
            _ => Vec::new(),
        };
        periods.push(DashaNode {
            lord,
            level,
            start,
            end,
            duration_years: years,
            children,
        });
        start = end;
    }
    periods
}

/// The active period at each level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentPeriod {
    pub mahadasha: Body,
    pub antardasha: Body,
    pub pratyantardasha: Body,
    pub mahadasha_ends: DateTime<Utc>,
    pub antardasha_ends: DateTime<Utc>,
    pub pratyantardasha_ends: DateTime<Utc>,
}

/// Walk the tree to the active mahadasha/antardasha/pratyantardasha.
pub fn current_period(tree: &[DashaNode], at: DateTime<Utc>) -> Option<CurrentPeriod> {
    let maha = tree.iter().find(|n| n.contains(at))?;
    let antar = maha.children.iter().find(|n| n.contains(at))?;
    let pratyantar = antar.children.iter().find(|n| n.contains(at))?;
    Some(CurrentPeriod {
        mahadasha: maha.lord,
        antardasha: antar.lord,
        pratyantardasha: pratyantar.lord,
        mahadasha_ends: maha.end,
        antardasha_ends: antar.end,
        pratyantardasha_ends: pratyantar.end,
    })
}

/// The next `count` period boundaries after `at`, most imminent first.
pub fn upcoming_transitions(
    tree: &[DashaNode],
    at: DateTime<Utc>,
    count: usize,
) -> Vec<(DateTime<Utc>, DashaLevel, Body)> {
    let mut transitions = Vec::new();
    collect_starts(tree, at, &mut transitions);
    transitions.sort_by_key(|(when, _, _)| *when);
    transitions.truncate(count);
    transitions
}

fn collect_starts(
    nodes: &[DashaNode],
    after: DateTime<Utc>,
    out: &mut Vec<(DateTime<Utc>, DashaLevel, Body)>,
) {
    for node in nodes {
        if node.start > after {
            out.push((node.start, node.level, node.lord));
        }
        // Skip subtrees entirely in the past.
        if node.end > after {
            collect_starts(&node.children, after, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn birth() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(1990, 6, 15, 18, 30, 0).unwrap()
    }

    #[test]
    fn test_tree_spans_120_years() {
        let tree = build_dasha_tree(200.0, birth());
        assert_eq!(tree.len(), 9);
        let total: f64 = tree.iter().map(|n| n.duration_years).sum();
        assert!((total - 120.0).abs() < 1e-9);
    }

    #[test]
    fn test_starting_lord_from_moon_nakshatra() {
        // 0 degrees: Ashwini, ruled by Ketu, nothing elapsed.
        let tree = build_dasha_tree(0.0, birth());
        assert_eq!(tree[0].lord, Body::Ketu);
        assert_eq!(tree[0].start, birth());
        assert_eq!(tree[1].lord, Body::Venus);
    }

    #[test]
    fn test_elapsed_fraction_shifts_start_back() {
        // Halfway through Ashwini: half of Ketu's 7 years already served.
        let tree = build_dasha_tree(NAKSHATRA_ARC / 2.0, birth());
        let expected_start = birth() - years_duration(3.5);
        let drift = (tree[0].start - expected_start).num_seconds().abs();
        assert!(drift <= 1, "drift = {drift}s");
    }

    #[test]
    fn test_antardasha_scaling_rule() {
        let tree = build_dasha_tree(0.0, birth());
        // Rahu mahadasha (18y): its Jupiter antardasha is 18*16/120 = 2.4y.
        let rahu = tree.iter().find(|n| n.lord == Body::Rahu).unwrap();
        assert_eq!(rahu.children.len(), 9);
        assert_eq!(rahu.children[0].lord, Body::Rahu);
        let jupiter = rahu.children.iter().find(|n| n.lord == Body::Jupiter).unwrap();
        assert!((jupiter.duration_years - 2.4).abs() < 1e-9);

        // Sub-periods tile the parent exactly.
        assert_eq!(rahu.children[0].start, rahu.start);
        assert_eq!(rahu.children[8].end, rahu.end);
    }

    #[test]
    fn test_pratyantardasha_depth() {
        let tree = build_dasha_tree(120.0, birth());
        let antar = &tree[0].children[0];
        assert_eq!(antar.children.len(), 9);
        assert_eq!(antar.children[0].level, DashaLevel::Pratyantardasha);
        assert!(antar.children[0].children.is_empty());
        // Scaling continues: pratyantar of L in antar of years Y is Y*years(L)/120.
        let first = &antar.children[0];
        let expected = antar.duration_years * dasha_years(first.lord).unwrap() / 120.0;
        assert!((first.duration_years - expected).abs() < 1e-9);
    }

    #[test]
    fn test_current_period_at_birth() {
        let moon = 200.0; // Vishakha, ruled by Jupiter
        let tree = build_dasha_tree(moon, birth());
        let current = current_period(&tree, birth()).unwrap();
        assert_eq!(current.mahadasha, Body::Jupiter);
        assert!(current.mahadasha_ends > birth());
    }

    #[test]
    fn test_upcoming_transitions_sorted() {
        let tree = build_dasha_tree(10.0, birth());
        let next = upcoming_transitions(&tree, birth(), 12);
        assert_eq!(next.len(), 12);
        for pair in next.windows(2) {
            assert!(pair[0].0 <= pair[1].0);
        }
        assert!(next[0].0 > birth());
    }
}
