//! Forecast Engine
//!
//! Projects daily revenue forward from a window of historical day totals.
//! Each projected day compounds on the previous one, scaled by the seasonal
//! calendar and the scenario multipliers. The projection is deterministic.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::DomainError;
use crate::query::{AggregateBucket, BucketKey, DateRange, QueryService};

use super::calendar::seasonal_factor;
use super::scenario::Scenario;

/// Day buckets echoed back alongside a forecast
pub const RECENT_HISTORY_DAYS: usize = 30;

/// Revenue total of one historical day
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistoricalPoint {
    pub date: NaiveDate,
    pub total: f64,
}

impl HistoricalPoint {
    pub fn new(date: NaiveDate, total: f64) -> Self {
        Self { date, total }
    }

    /// Converts a `by_day` bucket. Buckets of other granularities yield `None`.
    pub fn from_bucket(bucket: &AggregateBucket) -> Option<Self> {
        match bucket.key {
            BucketKey::Day(date) => Some(Self::new(date, bucket.total.to_f64())),
            _ => None,
        }
    }
}

/// One projected day
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub predicted: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
}

/// Summary statistics of the history window
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Baseline {
    pub mean: f64,
    /// Population standard deviation
    pub std_dev: f64,
}

impl Baseline {
    /// # Errors
    /// `DomainError::DegenerateStatistics` for an empty history
    pub fn from_history(history: &[HistoricalPoint]) -> Result<Self, DomainError> {
        if history.is_empty() {
            return Err(DomainError::DegenerateStatistics(
                "forecast requires at least one historical day".to_string(),
            ));
        }

        let n = history.len() as f64;
        let mean = history.iter().map(|p| p.total).sum::<f64>() / n;
        let variance = history
            .iter()
            .map(|p| (p.total - mean).powi(2))
            .sum::<f64>()
            / n;

        Ok(Self {
            mean,
            std_dev: variance.sqrt(),
        })
    }

    /// Relative spread used for the confidence band; 0 for a zero mean
    pub fn volatility(&self) -> f64 {
        if self.mean == 0.0 {
            0.0
        } else {
            self.std_dev / self.mean
        }
    }
}

/// Full forecast response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastReport {
    pub baseline: Baseline,
    pub recent_history: Vec<HistoricalPoint>,
    pub points: Vec<ForecastPoint>,
}

/// Forecast Engine
#[derive(Debug, Clone, Copy)]
pub struct ForecastEngine {
    history_days: u32,
    forecast_days: u32,
}

impl Default for ForecastEngine {
    fn default() -> Self {
        Self::new(90, 30)
    }
}

impl ForecastEngine {
    pub fn new(history_days: u32, forecast_days: u32) -> Self {
        Self {
            history_days,
            forecast_days,
        }
    }

    pub fn history_days(&self) -> u32 {
        self.history_days
    }

    pub fn forecast_days(&self) -> u32 {
        self.forecast_days
    }

    pub fn with_forecast_days(self, forecast_days: u32) -> Self {
        Self {
            forecast_days,
            ..self
        }
    }

    /// Project `forecast_days` days after the last history entry.
    ///
    /// `history` must be ascending by date. The first projected value starts
    /// from the last historical total; later days compound on their
    /// predecessor.
    ///
    /// # Errors
    /// `DomainError::DegenerateStatistics` for an empty history
    pub fn project(
        &self,
        history: &[HistoricalPoint],
        scenario: &Scenario,
    ) -> Result<Vec<ForecastPoint>, DomainError> {
        let baseline = Baseline::from_history(history)?;
        let Some(last) = history.last() else {
            return Ok(Vec::new());
        };

        let volatility = baseline.volatility();
        let scenario_factor = scenario.combined_multiplier();

        let mut points = Vec::with_capacity(self.forecast_days as usize);
        let mut date = last.date;
        let mut value = last.total;

        for _ in 0..self.forecast_days {
            date = date.succ_opt().ok_or_else(|| {
                DomainError::invalid_parameter("days", "forecast runs past the last calendar date")
            })?;
            value *= seasonal_factor(date) * scenario_factor;

            points.push(ForecastPoint {
                date,
                predicted: value,
                lower_bound: (value * (1.0 - volatility)).max(0.0),
                upper_bound: value * (1.0 + volatility),
            });
        }

        Ok(points)
    }

    /// Forecast from the store: loads `history_days` of day totals ending on
    /// `as_of` and projects past them.
    pub fn forecast(
        &self,
        query: &QueryService<'_>,
        as_of: NaiveDate,
        scenario: &Scenario,
    ) -> Result<ForecastReport, DomainError> {
        let range = DateRange::trailing_days(as_of, self.history_days);
        let history: Vec<HistoricalPoint> = query
            .by_day(&range)
            .iter()
            .filter_map(HistoricalPoint::from_bucket)
            .collect();

        let baseline = Baseline::from_history(&history)?;
        let points = self.project(&history, scenario)?;

        tracing::debug!(
            history_days = history.len(),
            mean = baseline.mean,
            std_dev = baseline.std_dev,
            forecast_days = points.len(),
            "Forecast computed"
        );

        let recent_start = history.len().saturating_sub(RECENT_HISTORY_DAYS);
        Ok(ForecastReport {
            baseline,
            recent_history: history[recent_start..].to_vec(),
            points,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::{PricingStrategy, RetentionTier};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// `len` days of `total`, ending on `last`
    fn flat_history(last: NaiveDate, len: u32, total: f64) -> Vec<HistoricalPoint> {
        (0..len)
            .rev()
            .map(|back| HistoricalPoint::new(last - chrono::Days::new(back as u64), total))
            .collect()
    }

    fn scenario(marketing: f64, growth: f64) -> Scenario {
        Scenario::new(marketing, growth, PricingStrategy::Normal, RetentionTier::Medium).unwrap()
    }

    #[test]
    fn test_flat_history_first_point() {
        let history = flat_history(day(2024, 3, 5), 30, 1000.0);
        let engine = ForecastEngine::new(90, 2);

        let points = engine.project(&history, &Scenario::default()).unwrap();

        // Wednesday in March: 1000 × 1.0 × 0.9
        assert_eq!(points[0].date, day(2024, 3, 6));
        assert!((points[0].predicted - 900.0).abs() < 1e-9);
        assert_eq!(points[0].lower_bound, points[0].predicted);
        assert_eq!(points[0].upper_bound, points[0].predicted);

        // Thursday compounds on Wednesday's value
        assert_eq!(points[1].date, day(2024, 3, 7));
        assert!((points[1].predicted - 810.0).abs() < 1e-9);
    }

    #[test]
    fn test_holiday_factor_applied() {
        let history = flat_history(day(2024, 11, 24), 10, 1000.0);
        let points = ForecastEngine::new(90, 1)
            .project(&history, &Scenario::default())
            .unwrap();

        assert_eq!(points[0].date, day(2024, 11, 25));
        assert!((points[0].predicted - 3500.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_marketing_zeroes_forecast() {
        let history = flat_history(day(2024, 3, 5), 10, 1000.0);
        let points = ForecastEngine::new(90, 5)
            .project(&history, &scenario(0.0, 0.0))
            .unwrap();

        assert_eq!(points.len(), 5);
        assert!(points.iter().all(|p| p.predicted == 0.0 && p.lower_bound == 0.0));
    }

    #[test]
    fn test_double_marketing_doubles_first_day() {
        let history = flat_history(day(2024, 3, 5), 10, 1000.0);
        let engine = ForecastEngine::new(90, 1);

        let base = engine.project(&history, &Scenario::default()).unwrap();
        let doubled = engine.project(&history, &scenario(2.0, 0.0)).unwrap();

        assert!((doubled[0].predicted - 2.0 * base[0].predicted).abs() < 1e-9);
    }

    #[test]
    fn test_bounds_follow_volatility() {
        let mut history = flat_history(day(2024, 3, 5), 4, 0.0);
        for (i, point) in history.iter_mut().enumerate() {
            point.total = if i % 2 == 0 { 900.0 } else { 1100.0 };
        }
        // mean 1000, population std 100
        let baseline = Baseline::from_history(&history).unwrap();
        assert!((baseline.volatility() - 0.1).abs() < 1e-12);

        let points = ForecastEngine::new(90, 3)
            .project(&history, &Scenario::default())
            .unwrap();
        for p in &points {
            assert!((p.upper_bound - p.predicted * 1.1).abs() < 1e-9);
            assert!((p.lower_bound - p.predicted * 0.9).abs() < 1e-9);
            assert!(p.lower_bound <= p.predicted && p.predicted <= p.upper_bound);
        }
    }

    #[test]
    fn test_lower_bound_clamped_at_zero() {
        let history = vec![
            HistoricalPoint::new(day(2024, 3, 3), 0.0),
            HistoricalPoint::new(day(2024, 3, 4), 0.0),
            HistoricalPoint::new(day(2024, 3, 5), 3000.0),
        ];
        let points = ForecastEngine::new(90, 1)
            .project(&history, &Scenario::default())
            .unwrap();

        // std/mean is sqrt(2) here
        assert_eq!(points[0].lower_bound, 0.0);
        assert!(points[0].upper_bound > points[0].predicted);
    }

    #[test]
    fn test_zero_mean_history_has_no_spread() {
        let history = flat_history(day(2024, 3, 5), 5, 0.0);
        let points = ForecastEngine::new(90, 3)
            .project(&history, &Scenario::default())
            .unwrap();

        assert!(points
            .iter()
            .all(|p| p.predicted == 0.0 && p.lower_bound == 0.0 && p.upper_bound == 0.0));
    }

    #[test]
    fn test_empty_history_is_degenerate() {
        let result = ForecastEngine::default().project(&[], &Scenario::default());
        assert!(matches!(result, Err(DomainError::DegenerateStatistics(_))));
    }

    #[test]
    fn test_zero_days_yields_no_points() {
        let history = flat_history(day(2024, 3, 5), 5, 1000.0);
        let points = ForecastEngine::new(90, 0)
            .project(&history, &Scenario::default())
            .unwrap();
        assert!(points.is_empty());
    }

    #[test]
    fn test_projection_is_deterministic() {
        let history = flat_history(day(2024, 12, 1), 60, 1234.5);
        let engine = ForecastEngine::new(90, 30);
        let scenario = scenario(1.3, 0.15);

        assert_eq!(
            engine.project(&history, &scenario).unwrap(),
            engine.project(&history, &scenario).unwrap()
        );
    }
}
