//! The sweep scheduler
//!
//! Sample dates are anchored to the absolute day number, not the range
//! start, so any partition of a range sweeps the identical sample grid and
//! merging partial results reproduces the union sweep exactly. Chunks of
//! samples run in parallel; the cancellation token is checked between
//! chunks and the sweep returns what it has, marked partial.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{Datelike, Duration, NaiveDate};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::warn;

use jyotish_core::{Body, JyotishError, Significance};
use jyotish_ephemeris::Ephemeris;

use crate::scans;
use crate::types::Pattern;

/// Cooperative cancellation handle for long sweeps.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, Default)]
pub struct DetectOptions {
    pub cancel: Option<CancelToken>,
}

/// Counts for one finished sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanSummary {
    pub total: usize,
    /// Patterns of high or extreme significance.
    pub high_significance: usize,
    pub per_kind: BTreeMap<String, usize>,
    /// Samples that failed to compute and were skipped.
    pub days_failed: usize,
}

/// Result of one sweep, ordered by (date, kind name).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternScan {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub patterns: Vec<Pattern>,
    pub summary: ScanSummary,
    /// True when cancellation stopped the sweep early.
    pub partial: bool,
}

impl PatternScan {
    /// Patterns grouped per kind name, preserving sweep order.
    pub fn by_kind(&self) -> BTreeMap<&'static str, Vec<&Pattern>> {
        let mut map: BTreeMap<&'static str, Vec<&Pattern>> = BTreeMap::new();
        for pattern in &self.patterns {
            map.entry(pattern.kind_name()).or_default().push(pattern);
        }
        map
    }
}

/// One scheduled evaluation.
#[derive(Debug, Clone, Copy)]
enum Job {
    OuterConjunctions(NaiveDate),
    MajorAspects(NaiveDate),
    Eclipses(NaiveDate),
    Stations(NaiveDate),
    Ingress(NaiveDate, Body, i64),
    KalaSarpa(NaiveDate),
    Gandanta(NaiveDate, Body),
    CriticalDegree(NaiveDate, Body),
}

impl Job {
    fn date(&self) -> NaiveDate {
        match *self {
            Job::OuterConjunctions(d)
            | Job::MajorAspects(d)
            | Job::Eclipses(d)
            | Job::Stations(d)
            | Job::Ingress(d, _, _)
            | Job::KalaSarpa(d)
            | Job::Gandanta(d, _)
            | Job::CriticalDegree(d, _) => d,
        }
    }

    fn run(&self, eph: &Ephemeris) -> Result<Vec<Pattern>, JyotishError> {
        match *self {
            Job::OuterConjunctions(d) => scans::outer_conjunctions(eph, d),
            Job::MajorAspects(d) => scans::major_aspects(eph, d),
            Job::Eclipses(d) => scans::eclipses(eph, d),
            Job::Stations(d) => scans::retrograde_stations(eph, d),
            Job::Ingress(d, body, step) => scans::cardinal_ingress(eph, d, body, step),
            Job::KalaSarpa(d) => scans::kala_sarpa(eph, d),
            Job::Gandanta(d, body) => scans::gandanta(eph, d, body),
            Job::CriticalDegree(d, body) => scans::critical_degree(eph, d, body),
        }
    }
}

/// Dates in [start, end] whose absolute day number is a multiple of
/// `step`. The absolute grid makes sweeps partition-independent.
fn grid(start: NaiveDate, end: NaiveDate, step: i64) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    let offset = start.num_days_from_ce() as i64 % step;
    let mut day = if offset == 0 {
        start
    } else {
        start + Duration::days(step - offset)
    };
    while day <= end {
        dates.push(day);
        day += Duration::days(step);
    }
    dates
}

fn schedule(start: NaiveDate, end: NaiveDate) -> Vec<Job> {
    let mut jobs = Vec::new();

    for date in grid(start, end, 7) {
        jobs.push(Job::OuterConjunctions(date));
        jobs.push(Job::KalaSarpa(date));
        for body in scans::SLOW_BODIES {
            jobs.push(Job::Gandanta(date, body));
            jobs.push(Job::CriticalDegree(date, body));
        }
    }
    for date in grid(start, end, 3) {
        jobs.push(Job::MajorAspects(date));
    }
    for date in grid(start, end, 1) {
        jobs.push(Job::Eclipses(date));
        jobs.push(Job::Stations(date));
        for body in scans::FAST_BODIES {
            jobs.push(Job::Gandanta(date, body));
            jobs.push(Job::CriticalDegree(date, body));
        }
    }
    for (body, step) in scans::INGRESS_PLANETS {
        for date in grid(start, end, step) {
            jobs.push(Job::Ingress(date, body, step));
        }
    }

    jobs.sort_by_key(|job| job.date());
    jobs
}

/// Sweep the closed interval [start, end].
pub fn detect(
    eph: &Ephemeris,
    start: NaiveDate,
    end: NaiveDate,
    options: &DetectOptions,
) -> Result<PatternScan, JyotishError> {
    if start > end {
        return Err(JyotishError::InvalidDateTime(format!(
            "sweep range start {start} is after end {end}"
        )));
    }

    let jobs = schedule(start, end);
    let mut patterns: Vec<Pattern> = Vec::new();
    let mut days_failed = 0usize;
    let mut partial = false;

    for chunk in jobs.chunks(64) {
        if let Some(cancel) = &options.cancel {
            if cancel.is_cancelled() {
                partial = true;
                break;
            }
        }

        let results: Vec<Result<Vec<Pattern>, JyotishError>> =
            chunk.par_iter().map(|job| job.run(eph)).collect();

        for (job, result) in chunk.iter().zip(results) {
            match result {
                Ok(found) => patterns.extend(found),
                Err(error) => {
                    warn!(date = %job.date(), %error, "pattern sample failed; skipping day");
                    days_failed += 1;
                }
            }
        }
    }

    // Deterministic merge order: date, then kind name, then the concrete
    // configuration.
    patterns.sort_by(|a, b| {
        (a.date, a.kind_name(), a.type_key(), a.orb_or_strength.to_bits()).cmp(&(
            b.date,
            b.kind_name(),
            b.type_key(),
            b.orb_or_strength.to_bits(),
        ))
    });

    let summary = summarize(&patterns, days_failed);
    Ok(PatternScan {
        start,
        end,
        patterns,
        summary,
        partial,
    })
}

fn summarize(patterns: &[Pattern], days_failed: usize) -> ScanSummary {
    let mut per_kind: BTreeMap<String, usize> = BTreeMap::new();
    let mut high_significance = 0;
    for pattern in patterns {
        *per_kind.entry(pattern.kind_name().to_string()).or_default() += 1;
        if pattern.significance >= Significance::High {
            high_significance += 1;
        }
    }
    ScanSummary {
        total: patterns.len(),
        high_significance,
        per_kind,
        days_failed,
    }
}
