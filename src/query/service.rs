//! Query Service
//!
//! Read-only aggregation over the event store. Every operation filters sales
//! by a closed date range and regroups them; nothing is cached and nothing in
//! the store is modified. Empty or inverted ranges produce empty results.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use chrono::{DateTime, Utc};

use crate::domain::{
    CategoryId, CategoryRef, DomainError, Gender, MaritalStatus, Money, Sale, User, UserId,
};
use crate::store::EventStore;

use super::dates::{BucketKey, DateRange, Interval};
use super::reports::{
    AffinityLink, AffinityNode, AgeBand, AgeCount, AggregateBucket, CategoryAffinity, Column,
    CustomerValue, DemographicBreakdown, DemographicDimension, DemographicSeries, GenderCount,
    KpiSummary, PriceBand, PriceBandSummary, ProductSummary, WideRow, WideTable,
};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// What a period bucket's `count` adds up
#[derive(Debug, Clone, Copy)]
enum Tally {
    /// One per sale record
    Orders,
    /// Sum of quantities
    Units,
}

impl Tally {
    fn of(&self, sale: &Sale) -> u64 {
        match self {
            Tally::Orders => 1,
            Tally::Units => u64::from(sale.quantity),
        }
    }
}

/// Query Service for aggregate reads
#[derive(Debug, Clone, Copy)]
pub struct QueryService<'a> {
    store: &'a EventStore,
}

impl<'a> QueryService<'a> {
    /// Create a new QueryService over a loaded store
    pub fn new(store: &'a EventStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &'a EventStore {
        self.store
    }

    // =========================================================================
    // Base filter
    // =========================================================================

    /// Sales whose timestamp falls inside `range`
    pub fn sales_in_range(&self, range: &DateRange) -> Vec<&'a Sale> {
        if range.is_empty() {
            return Vec::new();
        }
        self.store
            .sales()
            .iter()
            .filter(|sale| range.contains(sale.date))
            .collect()
    }

    // =========================================================================
    // Time buckets
    // =========================================================================

    /// Revenue and order count per calendar day, ascending
    pub fn by_day(&self, range: &DateRange) -> Vec<AggregateBucket> {
        self.by_period(range, Interval::Daily, Tally::Orders)
    }

    /// Revenue and order count per week (keyed by the week's Sunday), ascending
    pub fn by_week(&self, range: &DateRange) -> Vec<AggregateBucket> {
        self.by_period(range, Interval::Weekly, Tally::Orders)
    }

    /// Revenue and order count per `YYYY-MM`, ascending
    pub fn by_month(&self, range: &DateRange) -> Vec<AggregateBucket> {
        self.by_period(range, Interval::Monthly, Tally::Orders)
    }

    /// Revenue and units sold per period, ascending
    pub fn sales_trend(&self, range: &DateRange, interval: Interval) -> Vec<AggregateBucket> {
        self.by_period(range, interval, Tally::Units)
    }

    fn by_period(&self, range: &DateRange, interval: Interval, tally: Tally) -> Vec<AggregateBucket> {
        let mut buckets: BTreeMap<BucketKey, AggregateBucket> = BTreeMap::new();

        for sale in self.sales_in_range(range) {
            let key = interval.key_for(sale.day());
            let bucket = buckets
                .entry(key)
                .or_insert_with(|| AggregateBucket::new(key));
            bucket.total += sale.purchase_amount;
            bucket.count += tally.of(sale);
        }

        buckets.into_values().collect()
    }

    // =========================================================================
    // Categories and products
    // =========================================================================

    /// Revenue and units per category, descending by revenue.
    /// Ties keep the order in which categories were first seen.
    pub fn by_category(&self, range: &DateRange) -> Vec<AggregateBucket> {
        rank_categories(&self.sales_in_range(range))
    }

    /// The `limit` products with the highest revenue, descending.
    ///
    /// Names and categories come from the product catalog when the product
    /// still resolves, otherwise from the snapshot carried on the sale.
    pub fn top_products(&self, range: &DateRange, limit: usize) -> Vec<ProductSummary> {
        if limit == 0 {
            return Vec::new();
        }

        let mut summaries: Vec<ProductSummary> = Vec::new();
        let mut index = HashMap::new();

        for sale in self.sales_in_range(range) {
            let i = *index.entry(sale.product_id).or_insert_with(|| {
                let (name, category) = self.resolve_product(sale);
                summaries.push(ProductSummary {
                    id: sale.product_id,
                    name,
                    category,
                    total: Money::ZERO,
                    count: 0,
                });
                summaries.len() - 1
            });
            summaries[i].total += sale.purchase_amount;
            summaries[i].count += u64::from(sale.quantity);
        }

        // Stable sort keeps first-encountered order among equal totals
        summaries.sort_by(|a, b| b.total.cmp(&a.total));
        summaries.truncate(limit);
        summaries
    }

    fn resolve_product(&self, sale: &Sale) -> (String, String) {
        match self.store.product(sale.product_id) {
            Some(product) => (product.name.clone(), product.category.name.clone()),
            None => {
                tracing::debug!(
                    sale_id = sale.id,
                    product_id = sale.product_id,
                    "Product no longer resolves, using sale snapshot"
                );
                (sale.product_name.clone(), sale.category_name.clone())
            }
        }
    }

    /// Revenue per period with one zero-filled column per category seen in range
    pub fn by_category_and_time(&self, range: &DateRange, interval: Interval) -> WideTable {
        let sales = self.sales_in_range(range);

        let mut categories: BTreeMap<CategoryId, String> = BTreeMap::new();
        for sale in &sales {
            categories
                .entry(sale.category_id)
                .or_insert_with(|| sale.category_name.clone());
        }

        let columns = categories
            .into_iter()
            .map(|(id, name)| Column { id, name })
            .collect();

        pivot(&sales, interval, columns, |sale| sale.category_id)
    }

    /// Revenue per period for the top `limit` products, zero-filled
    pub fn top_products_over_time(
        &self,
        range: &DateRange,
        limit: usize,
        interval: Interval,
    ) -> WideTable {
        let columns: Vec<Column> = self
            .top_products(range, limit)
            .into_iter()
            .map(|product| Column {
                id: product.id,
                name: product.name,
            })
            .collect();

        if columns.is_empty() {
            return WideTable::default();
        }

        pivot(&self.sales_in_range(range), interval, columns, |sale| {
            sale.product_id
        })
    }

    /// Catalog product counts and in-range revenue per price band
    pub fn price_ranges(&self, range: &DateRange) -> Vec<PriceBandSummary> {
        let mut bands: Vec<PriceBandSummary> = PriceBand::ALL
            .iter()
            .map(|&band| PriceBandSummary {
                band,
                product_count: 0,
                revenue: Money::ZERO,
            })
            .collect();

        for product in self.store.products() {
            bands[PriceBand::from_price(product.price).index()].product_count += 1;
        }

        for sale in self.sales_in_range(range) {
            if let Some(product) = self.store.product(sale.product_id) {
                bands[PriceBand::from_price(product.price).index()].revenue +=
                    sale.purchase_amount;
            }
        }

        bands
    }

    // =========================================================================
    // Customers
    // =========================================================================

    /// Distinct purchasing user ids in first-purchase order
    pub fn purchaser_ids(&self, range: &DateRange) -> Vec<UserId> {
        let mut seen = HashSet::new();
        self.sales_in_range(range)
            .into_iter()
            .map(|sale| sale.user_id)
            .filter(|id| seen.insert(*id))
            .collect()
    }

    fn resolve_users(&self, ids: &[UserId]) -> Vec<&'a User> {
        ids.iter()
            .filter_map(|&id| {
                let user = self.store.user(id);
                if user.is_none() {
                    tracing::debug!(user_id = id, "User no longer resolves, skipping");
                }
                user
            })
            .collect()
    }

    /// Unique purchasing users per age bin.
    ///
    /// Purchasers whose user record no longer resolves are left out, so the
    /// counts can sum to fewer than `purchaser_ids`.
    pub fn age_distribution(&self, range: &DateRange) -> Vec<AgeCount> {
        let ids = self.purchaser_ids(range);
        if ids.is_empty() {
            return Vec::new();
        }

        let mut counts = [0u64; AgeBand::ALL.len()];
        for user in self.resolve_users(&ids) {
            counts[AgeBand::from_age(user.age).index()] += 1;
        }

        AgeBand::ALL
            .iter()
            .map(|&band| AgeCount {
                age_group: band,
                count: counts[band.index()],
            })
            .collect()
    }

    /// Unique purchasing users per gender; unresolvable users are left out
    pub fn gender_distribution(&self, range: &DateRange) -> Vec<GenderCount> {
        let ids = self.purchaser_ids(range);
        if ids.is_empty() {
            return Vec::new();
        }

        let users = self.resolve_users(&ids);
        Gender::ALL
            .iter()
            .map(|&gender| GenderCount {
                gender,
                count: users.iter().filter(|u| u.gender == gender).count() as u64,
            })
            .collect()
    }

    /// Category co-purchase graph.
    ///
    /// Nodes are the categories sold in range, most sale records first. A link
    /// joins two categories and counts the distinct users who bought in both;
    /// only the `limit` strongest links are kept, ties in category id order.
    pub fn category_affinity(&self, range: &DateRange, limit: usize) -> CategoryAffinity {
        let mut nodes: Vec<AffinityNode> = Vec::new();
        let mut node_index: HashMap<CategoryId, usize> = HashMap::new();
        let mut baskets: HashMap<UserId, BTreeSet<CategoryId>> = HashMap::new();

        for sale in self.sales_in_range(range) {
            let i = *node_index.entry(sale.category_id).or_insert_with(|| {
                nodes.push(AffinityNode {
                    category: CategoryRef::new(sale.category_id, sale.category_name.clone()),
                    sale_count: 0,
                });
                nodes.len() - 1
            });
            nodes[i].sale_count += 1;
            baskets
                .entry(sale.user_id)
                .or_default()
                .insert(sale.category_id);
        }

        let mut pairs: BTreeMap<(CategoryId, CategoryId), u64> = BTreeMap::new();
        for categories in baskets.values() {
            for (i, &source) in categories.iter().enumerate() {
                for &target in categories.iter().skip(i + 1) {
                    *pairs.entry((source, target)).or_insert(0) += 1;
                }
            }
        }

        let mut links: Vec<AffinityLink> = pairs
            .into_iter()
            .map(|((source, target), customers)| AffinityLink {
                source,
                target,
                customers,
            })
            .collect();
        links.sort_by(|a, b| b.customers.cmp(&a.customers));
        links.truncate(limit);

        nodes.sort_by(|a, b| {
            b.sale_count
                .cmp(&a.sale_count)
                .then(a.category.id.cmp(&b.category.id))
        });

        CategoryAffinity { nodes, links }
    }

    /// Revenue by demographic label for the `top` categories of the range
    pub fn demographic_purchases(
        &self,
        range: &DateRange,
        dimension: DemographicDimension,
        top: usize,
    ) -> DemographicBreakdown {
        let sales = self.sales_in_range(range);

        let categories: Vec<CategoryRef> = rank_categories(&sales)
            .into_iter()
            .take(top)
            .filter_map(|bucket| match bucket.key {
                BucketKey::Category(id) => {
                    Some(CategoryRef::new(id, bucket.label.unwrap_or_default()))
                }
                _ => None,
            })
            .collect();

        if categories.is_empty() {
            return DemographicBreakdown {
                dimension,
                labels: Vec::new(),
                series: Vec::new(),
            };
        }

        let labels: Vec<String> = match dimension {
            DemographicDimension::Age => AgeBand::ALL.iter().map(|b| b.label().to_string()).collect(),
            DemographicDimension::Gender => {
                Gender::ALL.iter().map(|g| g.as_str().to_string()).collect()
            }
            DemographicDimension::Marital => MaritalStatus::ALL
                .iter()
                .map(|m| m.as_str().to_string())
                .collect(),
            DemographicDimension::Occupation => {
                let ids = self.purchaser_ids(range);
                self.resolve_users(&ids)
                    .into_iter()
                    .map(|u| u.occupation.clone())
                    .collect::<BTreeSet<_>>()
                    .into_iter()
                    .collect()
            }
        };

        let label_index: HashMap<&str, usize> = labels
            .iter()
            .enumerate()
            .map(|(i, label)| (label.as_str(), i))
            .collect();
        let category_index: HashMap<CategoryId, usize> = categories
            .iter()
            .enumerate()
            .map(|(i, category)| (category.id, i))
            .collect();

        let mut values = vec![vec![Money::ZERO; labels.len()]; categories.len()];
        for sale in &sales {
            let Some(&c) = category_index.get(&sale.category_id) else {
                continue;
            };
            let Some(user) = self.store.user(sale.user_id) else {
                continue;
            };
            let label = demographic_label(dimension, user);
            if let Some(&l) = label_index.get(label.as_str()) {
                values[c][l] += sale.purchase_amount;
            }
        }

        let series = categories
            .into_iter()
            .zip(values)
            .map(|(category, values)| DemographicSeries { category, values })
            .collect();

        DemographicBreakdown {
            dimension,
            labels,
            series,
        }
    }

    /// Per-customer lifetime figures over every sale in the store, by user id
    pub fn customer_lifetime_values(&self) -> Result<Vec<CustomerValue>, DomainError> {
        struct Lifetime {
            total: Money,
            purchases: u64,
            first: DateTime<Utc>,
            last: DateTime<Utc>,
        }

        let mut by_user: BTreeMap<UserId, Lifetime> = BTreeMap::new();
        for sale in self.store.sales() {
            let lifetime = by_user.entry(sale.user_id).or_insert(Lifetime {
                total: Money::ZERO,
                purchases: 0,
                first: sale.date,
                last: sale.date,
            });
            lifetime.total += sale.purchase_amount;
            lifetime.purchases += 1;
            lifetime.first = lifetime.first.min(sale.date);
            lifetime.last = lifetime.last.max(sale.date);
        }

        by_user
            .into_iter()
            .map(|(user_id, lifetime)| -> Result<CustomerValue, DomainError> {
                let days = (lifetime.last - lifetime.first).num_milliseconds() as f64
                    / MILLIS_PER_DAY
                    + 1.0;
                Ok(CustomerValue {
                    user_id,
                    total_spent: lifetime.total,
                    purchase_count: lifetime.purchases,
                    average_order_value: lifetime.total.per(lifetime.purchases),
                    purchase_frequency: lifetime.purchases as f64 / (days / 30.0),
                    lifetime_value: lifetime.total.scaled(1.0 + 0.1 * days / 365.0)?,
                })
            })
            .collect()
    }

    // =========================================================================
    // Headline figures
    // =========================================================================

    /// Totals for `range` with percentage change against the preceding window
    pub fn overview(&self, range: &DateRange) -> KpiSummary {
        let current = self.period_totals(range);
        let previous = self.period_totals(&range.preceding());

        KpiSummary {
            total_sales: current.sales,
            order_count: current.orders,
            average_order_value: current.average_order(),
            customer_count: current.customers,
            sales_change_pct: percent_change(current.sales.to_f64(), previous.sales.to_f64()),
            average_order_change_pct: percent_change(
                current.average_order().to_f64(),
                previous.average_order().to_f64(),
            ),
            customer_change_pct: percent_change(
                current.customers as f64,
                previous.customers as f64,
            ),
        }
    }

    fn period_totals(&self, range: &DateRange) -> PeriodTotals {
        let sales = self.sales_in_range(range);
        PeriodTotals {
            sales: sales.iter().map(|s| s.purchase_amount).sum(),
            orders: sales.len() as u64,
            customers: self.purchaser_ids(range).len() as u64,
        }
    }
}

struct PeriodTotals {
    sales: Money,
    orders: u64,
    customers: u64,
}

impl PeriodTotals {
    fn average_order(&self) -> Money {
        self.sales.per(self.orders)
    }
}

/// Percentage change from `previous` to `current`.
///
/// A zero baseline reports 100% growth, or 0% when both are zero.
pub fn percent_change(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        return if current == 0.0 { 0.0 } else { 100.0 };
    }
    (current - previous) / previous * 100.0
}

fn rank_categories(sales: &[&Sale]) -> Vec<AggregateBucket> {
    let mut buckets: Vec<AggregateBucket> = Vec::new();
    let mut index = HashMap::new();

    for sale in sales {
        let i = *index.entry(sale.category_id).or_insert_with(|| {
            let mut bucket = AggregateBucket::new(BucketKey::Category(sale.category_id));
            bucket.label = Some(sale.category_name.clone());
            buckets.push(bucket);
            buckets.len() - 1
        });
        buckets[i].total += sale.purchase_amount;
        buckets[i].count += u64::from(sale.quantity);
    }

    buckets.sort_by(|a, b| b.total.cmp(&a.total));
    buckets
}

fn pivot<F>(sales: &[&Sale], interval: Interval, columns: Vec<Column>, column_of: F) -> WideTable
where
    F: Fn(&Sale) -> u32,
{
    let position: HashMap<u32, usize> = columns
        .iter()
        .enumerate()
        .map(|(i, column)| (column.id, i))
        .collect();

    let mut rows: BTreeMap<BucketKey, Vec<Money>> = BTreeMap::new();
    for sale in sales {
        let Some(&column) = position.get(&column_of(*sale)) else {
            continue;
        };
        let totals = rows
            .entry(interval.key_for(sale.day()))
            .or_insert_with(|| vec![Money::ZERO; columns.len()]);
        totals[column] += sale.purchase_amount;
    }

    WideTable {
        columns,
        rows: rows
            .into_iter()
            .map(|(period, totals)| WideRow { period, totals })
            .collect(),
    }
}

fn demographic_label(dimension: DemographicDimension, user: &User) -> String {
    match dimension {
        DemographicDimension::Age => AgeBand::from_age(user.age).label().to_string(),
        DemographicDimension::Gender => user.gender.as_str().to_string(),
        DemographicDimension::Occupation => user.occupation.clone(),
        DemographicDimension::Marital => user.marital_status.as_str().to_string(),
    }
}
