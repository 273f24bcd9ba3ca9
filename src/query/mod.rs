//! Query module
//!
//! Read models computed on demand from the event store: time buckets,
//! category and product rankings, demographic breakdowns and headline KPIs.

mod dates;
mod reports;
mod service;

pub use dates::{week_start, BucketKey, DateInput, DateRange, Interval};
pub use reports::{
    AffinityLink, AffinityNode, AgeBand, AgeCount, AggregateBucket, CategoryAffinity, Column, CustomerValue, DemographicBreakdown,
    DemographicDimension, DemographicSeries, GenderCount, KpiSummary, PriceBand,
    PriceBandSummary, ProductSummary, WideRow, WideTable,
};
pub use service::{percent_change, QueryService};
