//! RetailIQ Library
//!
//! Re-exports modules for integration testing and external use.

pub mod api;
pub mod domain;
pub mod forecast;
pub mod generator;
pub mod query;
pub mod store;

pub mod config;
mod error;

pub use config::Config;
pub use domain::{DomainError, Money, MoneyError};
pub use error::{AppError, AppResult, ErrorResponse};
pub use forecast::{ForecastEngine, Scenario};
pub use query::{DateRange, QueryService};
pub use store::EventStore;
