//! Query output records
//!
//! Plain aggregate rows handed to callers. They are built fresh for every
//! query and carry no references back into the store.

use serde::{Deserialize, Serialize};

use crate::domain::{CategoryId, CategoryRef, Gender, Money, ProductId, UserId};

use super::dates::BucketKey;

/// One aggregation row keyed by a time period or category.
///
/// What `count` counts depends on the query that produced the bucket:
/// orders for `by_day`/`by_week`/`by_month`, units for `by_category` and
/// `sales_trend`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateBucket {
    pub key: BucketKey,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub total: Money,
    pub count: u64,
}

impl AggregateBucket {
    pub(crate) fn new(key: BucketKey) -> Self {
        Self {
            key,
            label: None,
            total: Money::ZERO,
            count: 0,
        }
    }
}

/// Revenue summary for one product
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductSummary {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub total: Money,
    /// Units sold
    pub count: u64,
}

/// Age bins (upper bounds inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AgeBand {
    Under18,
    From18To25,
    From26To35,
    From36To45,
    From46To55,
    From56To65,
    Over65,
}

impl AgeBand {
    pub const ALL: [AgeBand; 7] = [
        AgeBand::Under18,
        AgeBand::From18To25,
        AgeBand::From26To35,
        AgeBand::From36To45,
        AgeBand::From46To55,
        AgeBand::From56To65,
        AgeBand::Over65,
    ];

    pub fn from_age(age: u8) -> Self {
        match age {
            0..=17 => AgeBand::Under18,
            18..=25 => AgeBand::From18To25,
            26..=35 => AgeBand::From26To35,
            36..=45 => AgeBand::From36To45,
            46..=55 => AgeBand::From46To55,
            56..=65 => AgeBand::From56To65,
            _ => AgeBand::Over65,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AgeBand::Under18 => "0-17",
            AgeBand::From18To25 => "18-25",
            AgeBand::From26To35 => "26-35",
            AgeBand::From36To45 => "36-45",
            AgeBand::From46To55 => "46-55",
            AgeBand::From56To65 => "56-65",
            AgeBand::Over65 => "65+",
        }
    }

    pub(crate) fn index(&self) -> usize {
        *self as usize
    }
}

impl Serialize for AgeBand {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Unique purchasing users in one age bin
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgeCount {
    pub age_group: AgeBand,
    pub count: u64,
}

/// Unique purchasing users of one gender
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenderCount {
    pub gender: Gender,
    pub count: u64,
}

/// Column header of a wide table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    pub id: u32,
    pub name: String,
}

/// One time bucket of a wide table; `totals[i]` belongs to `columns[i]`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WideRow {
    pub period: BucketKey,
    pub totals: Vec<Money>,
}

/// Time buckets × columns, zero-filled
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct WideTable {
    pub columns: Vec<Column>,
    pub rows: Vec<WideRow>,
}

impl WideTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Total for column `id` in the row keyed by `period`
    pub fn value(&self, period: &BucketKey, id: u32) -> Option<Money> {
        let column = self.columns.iter().position(|c| c.id == id)?;
        let row = self.rows.iter().find(|r| &r.period == period)?;
        row.totals.get(column).copied()
    }
}

/// Headline figures for a period compared with the one before it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiSummary {
    pub total_sales: Money,
    pub order_count: u64,
    pub average_order_value: Money,
    pub customer_count: u64,
    pub sales_change_pct: f64,
    pub average_order_change_pct: f64,
    pub customer_change_pct: f64,
}

/// Lifetime purchasing figures for one customer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerValue {
    pub user_id: UserId,
    pub total_spent: Money,
    pub purchase_count: u64,
    pub average_order_value: Money,
    /// Purchases per 30 days of customer lifetime
    pub purchase_frequency: f64,
    pub lifetime_value: Money,
}

/// Product price bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PriceBand {
    Below50,
    From50To100,
    From100To250,
    From250To500,
    From500To1000,
    Over1000,
}

impl PriceBand {
    pub const ALL: [PriceBand; 6] = [
        PriceBand::Below50,
        PriceBand::From50To100,
        PriceBand::From100To250,
        PriceBand::From250To500,
        PriceBand::From500To1000,
        PriceBand::Over1000,
    ];

    pub fn from_price(price: Money) -> Self {
        const UPPER_BOUNDS_CENTS: [u64; 5] = [5_000, 10_000, 25_000, 50_000, 100_000];

        UPPER_BOUNDS_CENTS
            .iter()
            .position(|&cents| price < Money::from_cents(cents))
            .map(|i| Self::ALL[i])
            .unwrap_or(PriceBand::Over1000)
    }

    pub fn label(&self) -> &'static str {
        match self {
            PriceBand::Below50 => "Below $50",
            PriceBand::From50To100 => "$50-$100",
            PriceBand::From100To250 => "$100-$250",
            PriceBand::From250To500 => "$250-$500",
            PriceBand::From500To1000 => "$500-$1000",
            PriceBand::Over1000 => "$1000+",
        }
    }

    pub(crate) fn index(&self) -> usize {
        *self as usize
    }
}

impl Serialize for PriceBand {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceBandSummary {
    pub band: PriceBand,
    /// Catalog products priced in this band
    pub product_count: u64,
    /// Revenue in range from products priced in this band
    pub revenue: Money,
}

/// Demographic axis for purchase cross-tabulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DemographicDimension {
    Age,
    Gender,
    Occupation,
    Marital,
}

impl std::str::FromStr for DemographicDimension {
    type Err = crate::domain::DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "age" => Ok(Self::Age),
            "gender" => Ok(Self::Gender),
            "occupation" => Ok(Self::Occupation),
            "marital" => Ok(Self::Marital),
            other => Err(crate::domain::DomainError::invalid_parameter(
                "dimension",
                format!("expected age, gender, occupation or marital, got '{}'", other),
            )),
        }
    }
}

/// Revenue of one category across the demographic labels
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemographicSeries {
    pub category: CategoryRef,
    /// Aligned with `DemographicBreakdown::labels`
    pub values: Vec<Money>,
}

/// Revenue cross-tab: demographic label × category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemographicBreakdown {
    pub dimension: DemographicDimension,
    pub labels: Vec<String>,
    pub series: Vec<DemographicSeries>,
}

/// A category in the co-purchase graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AffinityNode {
    pub category: CategoryRef,
    /// Sale records in range
    pub sale_count: u64,
}

/// Two categories bought by the same customers; `source < target`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AffinityLink {
    pub source: CategoryId,
    pub target: CategoryId,
    /// Distinct users who bought in both
    pub customers: u64,
}

/// Category co-purchase graph, links strongest first
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CategoryAffinity {
    pub nodes: Vec<AffinityNode>,
    pub links: Vec<AffinityLink>,
}

impl CategoryAffinity {
    /// Customers linking `a` and `b`, in either order
    pub fn customers_between(&self, a: CategoryId, b: CategoryId) -> u64 {
        let (source, target) = if a <= b { (a, b) } else { (b, a) };
        self.links
            .iter()
            .find(|link| link.source == source && link.target == target)
            .map_or(0, |link| link.customers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_age_band_boundaries_inclusive_of_upper_bound() {
        assert_eq!(AgeBand::from_age(17), AgeBand::Under18);
        assert_eq!(AgeBand::from_age(18), AgeBand::From18To25);
        assert_eq!(AgeBand::from_age(25), AgeBand::From18To25);
        assert_eq!(AgeBand::from_age(26), AgeBand::From26To35);
        assert_eq!(AgeBand::from_age(65), AgeBand::From56To65);
        assert_eq!(AgeBand::from_age(66), AgeBand::Over65);
        assert_eq!(AgeBand::from_age(90).label(), "65+");
    }

    #[test]
    fn test_price_band_edges() {
        let band = |v| PriceBand::from_price(Money::new(v).unwrap());
        assert_eq!(band(dec!(49.99)), PriceBand::Below50);
        assert_eq!(band(dec!(50)), PriceBand::From50To100);
        assert_eq!(band(dec!(999.99)), PriceBand::From500To1000);
        assert_eq!(band(dec!(1000)), PriceBand::Over1000);
    }

    #[test]
    fn test_wide_table_lookup() {
        let period = BucketKey::Month {
            year: 2024,
            month: 1,
        };
        let table = WideTable {
            columns: vec![
                Column {
                    id: 1,
                    name: "Electronics".to_string(),
                },
                Column {
                    id: 2,
                    name: "Clothing".to_string(),
                },
            ],
            rows: vec![WideRow {
                period,
                totals: vec![Money::from_cents(100), Money::ZERO],
            }],
        };

        assert_eq!(table.value(&period, 2), Some(Money::ZERO));
        assert_eq!(table.value(&period, 3), None);
    }

    #[test]
    fn test_age_count_serializes_label() {
        let json = serde_json::to_string(&AgeCount {
            age_group: AgeBand::Over65,
            count: 3,
        })
        .unwrap();
        assert_eq!(json, r#"{"age_group":"65+","count":3}"#);
    }
}
