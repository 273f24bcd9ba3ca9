//! Forecast module
//!
//! Scenario-driven revenue projection over historical day totals.

mod calendar;
mod engine;
mod scenario;

pub use calendar::{holiday_on, seasonal_factor, Holiday, HOLIDAYS, MONTH_FACTORS};
pub use engine::{
    Baseline, ForecastEngine, ForecastPoint, ForecastReport, HistoricalPoint, RECENT_HISTORY_DAYS,
};
pub use scenario::{PricingStrategy, RetentionTier, Scenario};
