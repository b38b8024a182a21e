//! The six core operations

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use engine_chart::{compute_aspects, assess_strength, Aspect, Chart, StrengthAssessment};
use engine_correlator::{
    correlate, predict, Category, CategoryRisk, Correlation, CorrelationStatistics, Event,
};
use engine_panchanga::{build_dasha_tree, compute_panchang, DashaNode, Panchang};
use engine_patterns::{detect, CancelToken, DetectOptions, PatternScan};
use jyotish_core::{JyotishError, PlanetaryPosition};
use jyotish_ephemeris::{Ephemeris, EphemerisConfig};
use jyotish_time::{julian_day, resolve, Resolution};

/// Input for chart computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartRequest {
    /// "YYYY-MM-DD" civil date.
    pub date: String,
    /// "HH:MM" civil time.
    pub time: String,
    /// IANA zone id.
    pub timezone: String,
    pub place: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

/// Calendar computation takes the same shape.
pub type CalendarRequest = ChartRequest;

/// A chart with its resolution context, aspects, and strengths.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartResult {
    pub resolution: Resolution,
    pub chart: Chart,
    pub aspects: Vec<Aspect>,
    pub strengths: Vec<StrengthAssessment>,
}

/// Correlations plus batch statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrelationResult {
    pub correlations: Vec<Correlation>,
    pub statistics: CorrelationStatistics,
    pub patterns_considered: usize,
}

/// The engine handle. Construction is the static configuration point;
/// everything after it is per-request pure compute.
#[derive(Debug)]
pub struct JyotishEngine {
    ephemeris: Ephemeris,
}

impl JyotishEngine {
    pub fn new(config: EphemerisConfig) -> Self {
        Self {
            ephemeris: Ephemeris::new(config),
        }
    }

    pub fn ephemeris(&self) -> &Ephemeris {
        &self.ephemeris
    }

    /// Resolve the civil input and build the full sidereal chart.
    pub fn compute_chart(&self, request: &ChartRequest) -> Result<ChartResult, JyotishError> {
        let resolution = self.resolve_request(request)?;
        let jd = julian_day(resolution.utc);
        let chart = Chart::build(&self.ephemeris, jd, request.latitude, request.longitude)?;
        let aspects = compute_aspects(&chart);
        let strengths = chart.positions.values().map(assess_strength).collect();
        Ok(ChartResult {
            resolution,
            chart,
            aspects,
            strengths,
        })
    }

    /// Resolve the civil input and compute the panchang.
    pub fn compute_calendar(&self, request: &CalendarRequest) -> Result<Panchang, JyotishError> {
        let resolution = self.resolve_request(request)?;
        compute_panchang(
            &self.ephemeris,
            resolution.utc,
            request.latitude,
            request.longitude,
        )
    }

    /// Build the Vimshottari tree from a natal Moon position.
    pub fn compute_dasha(
        &self,
        natal_moon: &PlanetaryPosition,
        natal_instant: DateTime<Utc>,
    ) -> Vec<DashaNode> {
        build_dasha_tree(natal_moon.longitude, natal_instant)
    }

    /// Sweep a date range for patterns.
    pub fn detect_patterns(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        options: &DetectOptions,
    ) -> Result<PatternScan, JyotishError> {
        detect(&self.ephemeris, start, end, options)
    }

    /// Detect patterns over a range and correlate them with the supplied
    /// events. A cancelled (partial) sweep refuses rather than correlating
    /// against incomplete data.
    pub fn correlate(
        &self,
        events: &[Event],
        start: NaiveDate,
        end: NaiveDate,
        options: &DetectOptions,
    ) -> Result<CorrelationResult, JyotishError> {
        let scan = self.detect_patterns(start, end, options)?;
        if scan.partial {
            return Err(JyotishError::Cancelled);
        }
        let correlations = correlate(events, &scan.patterns);
        let statistics = engine_correlator::statistics(&correlations, 5);
        Ok(CorrelationResult {
            correlations,
            statistics,
            patterns_considered: scan.patterns.len(),
        })
    }

    /// Project per-category risk around a target date. `categories` of
    /// `None` means all categories.
    pub fn predict(
        &self,
        target_date: NaiveDate,
        categories: Option<&[Category]>,
        cancel: Option<CancelToken>,
    ) -> Result<BTreeMap<Category, CategoryRisk>, JyotishError> {
        let all = Category::ALL;
        let categories = categories.unwrap_or(&all);
        predict(&self.ephemeris, target_date, categories, cancel)
    }

    fn resolve_request(&self, request: &ChartRequest) -> Result<Resolution, JyotishError> {
        resolve(
            &request.date,
            &request.time,
            &request.timezone,
            request.place.as_deref(),
            Some((request.latitude, request.longitude)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jyotish_core::Body;

    fn engine() -> JyotishEngine {
        JyotishEngine::new(EphemerisConfig::default())
    }

    fn kolkata_request() -> ChartRequest {
        ChartRequest {
            date: "2000-09-30".to_string(),
            time: "12:00".to_string(),
            timezone: "Asia/Kolkata".to_string(),
            place: Some("Kolkata".to_string()),
            latitude: 22.5726459,
            longitude: 88.3638953,
        }
    }

    #[test]
    fn test_compute_chart_shape() {
        let result = engine().compute_chart(&kolkata_request()).unwrap();
        assert_eq!(result.chart.positions.len(), 9);
        assert_eq!(result.chart.houses.len(), 12);
        assert_eq!(result.strengths.len(), 9);
        assert!(!result.aspects.is_empty());
    }

    #[test]
    fn test_compute_calendar_shape() {
        let panchang = engine().compute_calendar(&kolkata_request()).unwrap();
        assert!(panchang.tithi.index < 30);
        assert!(panchang.sun_times.sunrise.is_some());
    }

    #[test]
    fn test_compute_dasha_from_chart() {
        let engine = engine();
        let result = engine.compute_chart(&kolkata_request()).unwrap();
        let moon = result.chart.position(Body::Moon).unwrap();
        let tree = engine.compute_dasha(moon, result.resolution.utc);
        assert_eq!(tree.len(), 9);
        let total: f64 = tree.iter().map(|n| n.duration_years).sum();
        assert!((total - 120.0).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_request_surfaces_typed_error() {
        let mut request = kolkata_request();
        request.date = "not-a-date".to_string();
        let err = engine().compute_chart(&request).unwrap_err();
        assert_eq!(err.kind(), "invalid_date_time");
    }

    #[test]
    fn test_correlate_cancelled_refuses() {
        let cancel = CancelToken::new();
        cancel.cancel();
        let err = engine()
            .correlate(
                &[],
                NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2020, 6, 30).unwrap(),
                &DetectOptions {
                    cancel: Some(cancel),
                },
            )
            .unwrap_err();
        assert_eq!(err.kind(), "cancelled");
    }
}
