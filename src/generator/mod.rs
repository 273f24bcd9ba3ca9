//! Synthetic data generator
//!
//! Produces a plausible retail history (users, a product catalog and daily
//! sales shaped by calendar demand) and loads it into an [`EventStore`].
//! A fixed seed reproduces the same store exactly.

mod catalog;
mod demand;

use std::collections::HashSet;

use chrono::{Days, Duration, NaiveDate, NaiveTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::domain::{
    CategoryRef, Gender, Location, MaritalStatus, Money, MoneyError, Product, Sale, User,
};
use crate::store::{EventStore, StoreError};

pub use catalog::MAX_DISTINCT_PRODUCTS;
pub use demand::{daily_order_count, demand_factor, first_sunday_from};

use catalog::{CATEGORIES, CITIES, FIRST_NAMES, LAST_NAMES, OCCUPATIONS};

/// Share of users drawn from the 1-17 age band
const MINOR_SHARE: f64 = 0.05;
/// Probability that a sale carries a discount
const DISCOUNT_PROBABILITY: f64 = 0.3;

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("Invalid generator configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Generator parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub user_count: u32,
    pub product_count: u32,
    /// Sales begin on the first Sunday on or after this date
    pub start_date: NaiveDate,
    /// Last day with sales, inclusive
    pub end_date: NaiveDate,
    /// `None` seeds from OS entropy
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        let start_date = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or_default();
        Self {
            user_count: 100,
            product_count: 100,
            start_date,
            end_date: Utc::now().date_naive(),
            seed: None,
        }
    }
}

impl GeneratorConfig {
    fn validate(&self) -> Result<(), GeneratorError> {
        if self.user_count == 0 {
            return Err(GeneratorError::InvalidConfig(
                "user_count must be at least 1".to_string(),
            ));
        }
        if self.product_count == 0 || self.product_count as usize > MAX_DISTINCT_PRODUCTS {
            return Err(GeneratorError::InvalidConfig(format!(
                "product_count must be within 1-{}, got {}",
                MAX_DISTINCT_PRODUCTS, self.product_count
            )));
        }
        if self.start_date > self.end_date {
            return Err(GeneratorError::InvalidConfig(format!(
                "start_date {} is after end_date {}",
                self.start_date, self.end_date
            )));
        }
        Ok(())
    }
}

/// Seeded record generator
pub struct DataGenerator {
    config: GeneratorConfig,
    rng: StdRng,
}

impl DataGenerator {
    pub fn new(config: GeneratorConfig) -> Result<Self, GeneratorError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self { config, rng })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate users, products and sales and load them into a store
    pub fn generate(&mut self) -> Result<EventStore, GeneratorError> {
        let users = self.users();
        let products = self.products()?;
        let sales = self.sales(&products)?;

        tracing::info!(
            users = users.len(),
            products = products.len(),
            sales = sales.len(),
            seed = ?self.config.seed,
            "Generated synthetic dataset"
        );

        Ok(EventStore::from_records(users, products, sales)?)
    }

    pub fn users(&mut self) -> Vec<User> {
        let count = self.config.user_count;
        let minors = (f64::from(count) * MINOR_SHARE).ceil() as u32;

        (1..=count)
            .map(|id| {
                let age = if id <= minors {
                    self.rng.gen_range(1..=17)
                } else {
                    self.rng.gen_range(18..=77)
                };
                let (city, state) = CITIES[self.rng.gen_range(0..CITIES.len())];
                let registration_date = NaiveDate::from_ymd_opt(
                    2022,
                    self.rng.gen_range(1..=12),
                    self.rng.gen_range(1..=28),
                )
                .unwrap_or_default();

                User {
                    id,
                    name: format!(
                        "{} {}",
                        FIRST_NAMES[self.rng.gen_range(0..FIRST_NAMES.len())],
                        LAST_NAMES[self.rng.gen_range(0..LAST_NAMES.len())]
                    ),
                    age,
                    gender: Gender::ALL[self.rng.gen_range(0..Gender::ALL.len())],
                    occupation: OCCUPATIONS[self.rng.gen_range(0..OCCUPATIONS.len())].to_string(),
                    marital_status: MaritalStatus::ALL
                        [self.rng.gen_range(0..MaritalStatus::ALL.len())],
                    location: Location {
                        city: city.to_string(),
                        state: state.to_string(),
                        country: "USA".to_string(),
                    },
                    registration_date,
                }
            })
            .collect()
    }

    /// Catalog of distinct (category, name, brand) products with ids 1..=N
    pub fn products(&mut self) -> Result<Vec<Product>, GeneratorError> {
        let count = self.config.product_count as usize;
        let release_floor = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or_default();
        let release_span = (self.config.end_date - release_floor).num_days().max(0);

        let mut seen = HashSet::new();
        let mut products = Vec::with_capacity(count);

        while products.len() < count {
            let category = &CATEGORIES[self.rng.gen_range(0..CATEGORIES.len())];
            let name = category.products[self.rng.gen_range(0..category.products.len())];
            let brand = category.brands[self.rng.gen_range(0..category.brands.len())];

            if !seen.insert((category.id, name, brand)) {
                continue;
            }

            let price = Money::from_f64(self.rng.gen_range(10.0..1000.0))?;
            let rating = (self.rng.gen_range(1.0_f32..=5.0) * 10.0).round() / 10.0;
            let release_date =
                release_floor + Days::new(self.rng.gen_range(0..=release_span) as u64);

            products.push(Product {
                id: products.len() as u32 + 1,
                name: name.to_string(),
                category: CategoryRef::new(category.id, category.name),
                price,
                stock: self.rng.gen_range(1..=500),
                rating,
                release_date,
                brand: brand.to_string(),
            });
        }

        Ok(products)
    }

    /// Daily sales from the first Sunday on or after the start date through
    /// the end date, with strictly increasing ids
    pub fn sales(&mut self, products: &[Product]) -> Result<Vec<Sale>, GeneratorError> {
        let mut sales = Vec::new();
        if products.is_empty() {
            return Ok(sales);
        }

        let first = first_sunday_from(self.config.start_date);
        let mut next_id = 1;

        for day in first.iter_days().take_while(|d| *d <= self.config.end_date) {
            let orders = daily_order_count(day, self.rng.gen_range(0.8..1.2));
            let midnight = day.and_time(NaiveTime::MIN).and_utc();

            for _ in 0..orders {
                let user_id = self.rng.gen_range(1..=self.config.user_count);
                let product = &products[self.rng.gen_range(0..products.len())];

                let seconds = self.rng.gen_range(0..86_400);
                let quantity = self.rng.gen_range(1..=3);
                let discount = if self.rng.gen_bool(DISCOUNT_PROBABILITY) {
                    self.rng.gen_range(0.1..0.3)
                } else {
                    0.0
                };

                sales.push(Sale {
                    id: next_id,
                    user_id,
                    product_id: product.id,
                    product_name: product.name.clone(),
                    date: midnight + Duration::seconds(seconds),
                    quantity,
                    purchase_amount: product.price.line_total(discount, quantity)?,
                    category_id: product.category.id,
                    category_name: product.category.name.clone(),
                });
                next_id += 1;
            }
        }

        tracing::debug!(
            first_day = %first,
            last_day = %self.config.end_date,
            sales = sales.len(),
            "Generated sales history"
        );

        Ok(sales)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::AgeBand;
    use chrono::Datelike;

    fn config(seed: u64) -> GeneratorConfig {
        GeneratorConfig {
            user_count: 40,
            product_count: 25,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
            seed: Some(seed),
        }
    }

    #[test]
    fn test_same_seed_same_store() {
        let a = DataGenerator::new(config(7)).unwrap().generate().unwrap();
        let b = DataGenerator::new(config(7)).unwrap().generate().unwrap();

        assert_eq!(a.users(), b.users());
        assert_eq!(a.products(), b.products());
        assert_eq!(a.sales(), b.sales());
    }

    #[test]
    fn test_users_include_minors() {
        let users = DataGenerator::new(config(1)).unwrap().users();

        assert_eq!(users.len(), 40);
        assert!(users[..2].iter().all(|u| (1..=17).contains(&u.age)));
        assert!(users[2..].iter().all(|u| (18..=77).contains(&u.age)));
        assert!(users
            .iter()
            .any(|u| AgeBand::from_age(u.age) == AgeBand::Under18));
        assert!(users.iter().all(|u| u.registration_date.year() == 2022));
    }

    #[test]
    fn test_products_are_distinct() {
        let mut generator = DataGenerator::new(config(3)).unwrap();
        let products = generator.products().unwrap();

        let keys: HashSet<_> = products
            .iter()
            .map(|p| (p.category.id, p.name.clone(), p.brand.clone()))
            .collect();
        assert_eq!(keys.len(), products.len());

        let low = Money::from_cents(1_000);
        let high = Money::from_cents(100_000);
        assert!(products.iter().all(|p| p.price >= low && p.price <= high));
        assert!(products.iter().all(|p| (1.0..=5.0).contains(&p.rating)));
        assert!(products.iter().all(|p| (1..=500).contains(&p.stock)));
    }

    #[test]
    fn test_sales_start_on_first_sunday() {
        let store = DataGenerator::new(config(11)).unwrap().generate().unwrap();
        let sales = store.sales();

        assert!(!sales.is_empty());
        let first_day = sales.iter().map(|s| s.day()).min().unwrap();
        let last_day = sales.iter().map(|s| s.day()).max().unwrap();
        // 2024-01-03 is a Wednesday
        assert_eq!(first_day, NaiveDate::from_ymd_opt(2024, 1, 7).unwrap());
        assert!(last_day <= NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());

        assert!(sales.windows(2).all(|w| w[0].id < w[1].id));
        assert!(sales.iter().all(|s| (1..=3).contains(&s.quantity)));
    }

    #[test]
    fn test_sales_never_exceed_list_price() {
        let store = DataGenerator::new(config(5)).unwrap().generate().unwrap();

        for sale in store.sales() {
            let product = store.product(sale.product_id).unwrap();
            assert!(sale.purchase_amount <= product.price * sale.quantity);
            assert_eq!(sale.category_id, product.category.id);
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut bad = config(1);
        bad.product_count = 1001;
        assert!(matches!(
            DataGenerator::new(bad),
            Err(GeneratorError::InvalidConfig(_))
        ));

        let mut inverted = config(1);
        inverted.start_date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert!(DataGenerator::new(inverted).is_err());
    }
}
