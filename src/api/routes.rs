//! API Routes
//!
//! Read-only dashboard endpoints over the shared event store.

use std::sync::Arc;

use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;

use super::extract::ApiQuery;
use crate::config::Config;
use crate::domain::DomainError;
use crate::error::{AppError, AppResult};
use crate::forecast::{ForecastEngine, ForecastReport, PricingStrategy, RetentionTier, Scenario};
use crate::query::{
    AgeCount, AggregateBucket, CategoryAffinity, CustomerValue, DateInput, DateRange,
    DemographicBreakdown, DemographicDimension, GenderCount, Interval, KpiSummary,
    PriceBandSummary, ProductSummary, QueryService, WideTable,
};
use crate::store::EventStore;

/// Longest projection a single request may ask for
pub const MAX_FORECAST_DAYS: u32 = 365;

// =========================================================================
// Shared state
// =========================================================================

/// State shared by every handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: Arc<EventStore>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: EventStore, config: Config) -> Self {
        Self {
            store: Arc::new(store),
            config: Arc::new(config),
        }
    }

    fn query(&self) -> QueryService<'_> {
        QueryService::new(&self.store)
    }

    /// Resolve optional request bounds. Missing bounds default to the
    /// configured window ending on the latest sale date.
    fn range(&self, start: Option<DateInput>, end: Option<DateInput>) -> AppResult<DateRange> {
        let anchor = self
            .store
            .latest_sale_date()
            .unwrap_or_else(|| Utc::now().date_naive());
        let days = self.config.default_range_days;

        let range = match (start, end) {
            (Some(start), Some(end)) => DateRange::new(start, end),
            (Some(start), None) => DateRange::new(start, anchor),
            (None, Some(end)) => DateRange::trailing_days(end.day(), days),
            (None, None) => DateRange::trailing_days(anchor, days),
        };
        range.validate()?;
        Ok(range)
    }
}

// =========================================================================
// Request types
// =========================================================================

#[derive(Debug, Default, Deserialize)]
pub struct RangeParams {
    #[serde(default)]
    pub start: Option<DateInput>,
    #[serde(default)]
    pub end: Option<DateInput>,
}

#[derive(Debug, Deserialize)]
pub struct IntervalParams {
    #[serde(default)]
    pub start: Option<DateInput>,
    #[serde(default)]
    pub end: Option<DateInput>,
    #[serde(default = "default_interval")]
    pub interval: Interval,
}

#[derive(Debug, Deserialize)]
pub struct TopProductsParams {
    #[serde(default)]
    pub start: Option<DateInput>,
    #[serde(default)]
    pub end: Option<DateInput>,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default = "default_interval")]
    pub interval: Interval,
}

#[derive(Debug, Deserialize)]
pub struct AffinityParams {
    #[serde(default)]
    pub start: Option<DateInput>,
    #[serde(default)]
    pub end: Option<DateInput>,
    #[serde(default = "default_affinity_links")]
    pub limit: usize,
}

#[derive(Debug, Deserialize)]
pub struct DemographicParams {
    #[serde(default)]
    pub start: Option<DateInput>,
    #[serde(default)]
    pub end: Option<DateInput>,
    #[serde(default = "default_dimension")]
    pub dimension: DemographicDimension,
    #[serde(default = "default_top_categories")]
    pub top: usize,
}

#[derive(Debug, Deserialize)]
pub struct LifetimeParams {
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Scenario sliders: marketing and growth are percentages
#[derive(Debug, Deserialize)]
pub struct ForecastParams {
    #[serde(default = "default_marketing")]
    pub marketing: f64,
    #[serde(default)]
    pub growth: f64,
    #[serde(default)]
    pub pricing: PricingStrategy,
    #[serde(default)]
    pub retention: RetentionTier,
    #[serde(default)]
    pub days: Option<u32>,
}

fn default_interval() -> Interval {
    Interval::Monthly
}

fn default_limit() -> usize {
    10
}

fn default_affinity_links() -> usize {
    12
}

fn default_dimension() -> DemographicDimension {
    DemographicDimension::Age
}

fn default_top_categories() -> usize {
    5
}

fn default_marketing() -> f64 {
    100.0
}

// =========================================================================
// API Router
// =========================================================================

/// Create the API router
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/overview", get(overview))
        // Time buckets
        .route("/sales/daily", get(sales_daily))
        .route("/sales/weekly", get(sales_weekly))
        .route("/sales/monthly", get(sales_monthly))
        .route("/sales/trend", get(sales_trend))
        // Categories
        .route("/sales/categories", get(sales_by_category))
        .route("/sales/categories/timeline", get(category_timeline))
        .route("/sales/categories/affinity", get(category_affinity))
        // Products
        .route("/products/top", get(top_products))
        .route("/products/timeline", get(product_timeline))
        .route("/products/price-ranges", get(price_ranges))
        // Customers
        .route("/customers/age", get(age_distribution))
        .route("/customers/gender", get(gender_distribution))
        .route("/customers/demographics", get(demographics))
        .route("/customers/lifetime-value", get(lifetime_values))
        // Forecast
        .route("/forecast", get(forecast))
}

// =========================================================================
// Handlers
// =========================================================================

async fn overview(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<RangeParams>,
) -> AppResult<Json<KpiSummary>> {
    let range = state.range(params.start, params.end)?;
    Ok(Json(state.query().overview(&range)))
}

async fn sales_daily(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<RangeParams>,
) -> AppResult<Json<Vec<AggregateBucket>>> {
    let range = state.range(params.start, params.end)?;
    Ok(Json(state.query().by_day(&range)))
}

async fn sales_weekly(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<RangeParams>,
) -> AppResult<Json<Vec<AggregateBucket>>> {
    let range = state.range(params.start, params.end)?;
    Ok(Json(state.query().by_week(&range)))
}

async fn sales_monthly(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<RangeParams>,
) -> AppResult<Json<Vec<AggregateBucket>>> {
    let range = state.range(params.start, params.end)?;
    Ok(Json(state.query().by_month(&range)))
}

async fn sales_trend(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<IntervalParams>,
) -> AppResult<Json<Vec<AggregateBucket>>> {
    let range = state.range(params.start, params.end)?;
    Ok(Json(state.query().sales_trend(&range, params.interval)))
}

async fn sales_by_category(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<RangeParams>,
) -> AppResult<Json<Vec<AggregateBucket>>> {
    let range = state.range(params.start, params.end)?;
    Ok(Json(state.query().by_category(&range)))
}

async fn category_timeline(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<IntervalParams>,
) -> AppResult<Json<WideTable>> {
    let range = state.range(params.start, params.end)?;
    Ok(Json(
        state.query().by_category_and_time(&range, params.interval),
    ))
}

async fn category_affinity(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<AffinityParams>,
) -> AppResult<Json<CategoryAffinity>> {
    let range = state.range(params.start, params.end)?;
    Ok(Json(state.query().category_affinity(&range, params.limit)))
}

async fn top_products(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<TopProductsParams>,
) -> AppResult<Json<Vec<ProductSummary>>> {
    let range = state.range(params.start, params.end)?;
    Ok(Json(state.query().top_products(&range, params.limit)))
}

async fn product_timeline(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<TopProductsParams>,
) -> AppResult<Json<WideTable>> {
    let range = state.range(params.start, params.end)?;
    Ok(Json(state.query().top_products_over_time(
        &range,
        params.limit,
        params.interval,
    )))
}

async fn price_ranges(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<RangeParams>,
) -> AppResult<Json<Vec<PriceBandSummary>>> {
    let range = state.range(params.start, params.end)?;
    Ok(Json(state.query().price_ranges(&range)))
}

async fn age_distribution(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<RangeParams>,
) -> AppResult<Json<Vec<AgeCount>>> {
    let range = state.range(params.start, params.end)?;
    Ok(Json(state.query().age_distribution(&range)))
}

async fn gender_distribution(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<RangeParams>,
) -> AppResult<Json<Vec<GenderCount>>> {
    let range = state.range(params.start, params.end)?;
    Ok(Json(state.query().gender_distribution(&range)))
}

async fn demographics(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<DemographicParams>,
) -> AppResult<Json<DemographicBreakdown>> {
    let range = state.range(params.start, params.end)?;
    Ok(Json(state.query().demographic_purchases(
        &range,
        params.dimension,
        params.top,
    )))
}

/// Customers ranked by lifetime value, highest first
async fn lifetime_values(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<LifetimeParams>,
) -> AppResult<Json<Vec<CustomerValue>>> {
    let mut customers = state.query().customer_lifetime_values()?;
    customers.sort_by(|a, b| b.lifetime_value.cmp(&a.lifetime_value));
    if let Some(limit) = params.limit {
        customers.truncate(limit);
    }
    Ok(Json(customers))
}

async fn forecast(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ForecastParams>,
) -> AppResult<Json<ForecastReport>> {
    let days = params.days.unwrap_or(state.config.forecast_days);
    if days > MAX_FORECAST_DAYS {
        return Err(AppError::Domain(DomainError::invalid_parameter(
            "days",
            format!("at most {} days can be projected, got {}", MAX_FORECAST_DAYS, days),
        )));
    }

    let scenario = Scenario::from_percentages(
        params.marketing,
        params.growth,
        params.pricing,
        params.retention,
    )?;

    let as_of = state.store.latest_sale_date().ok_or_else(|| {
        DomainError::DegenerateStatistics("the store holds no sales to forecast from".to_string())
    })?;

    let engine = ForecastEngine::new(state.config.history_days, days);
    let report = engine.forecast(&state.query(), as_of, &scenario)?;

    tracing::info!(
        as_of = %as_of,
        days = days,
        marketing = params.marketing,
        growth = params.growth,
        "Forecast served"
    );

    Ok(Json(report))
}
