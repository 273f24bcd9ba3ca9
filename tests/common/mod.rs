//! Common test utilities
#![allow(dead_code)]

use chrono::{NaiveDate, TimeZone, Utc};
use retail_iq::domain::{
    CategoryRef, Gender, Location, MaritalStatus, Money, Product, Sale, User,
};
use retail_iq::generator::{DataGenerator, GeneratorConfig};
use retail_iq::EventStore;

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Builder for small hand-written stores
#[derive(Default)]
pub struct StoreFixture {
    users: Vec<User>,
    products: Vec<Product>,
    sales: Vec<Sale>,
}

impl StoreFixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user(mut self, id: u32, age: u8, gender: Gender) -> Self {
        self.users.push(User {
            id,
            name: format!("Customer {}", id),
            age,
            gender,
            occupation: "Engineer".to_string(),
            marital_status: MaritalStatus::Single,
            location: Location {
                city: "Denver".to_string(),
                state: "Colorado".to_string(),
                country: "USA".to_string(),
            },
            registration_date: day(2022, 6, 1),
        });
        self
    }

    pub fn product(mut self, id: u32, name: &str, category: (u32, &str), price_cents: u64) -> Self {
        self.products.push(Product {
            id,
            name: name.to_string(),
            category: CategoryRef::new(category.0, category.1),
            price: Money::from_cents(price_cents),
            stock: 50,
            rating: 4.0,
            release_date: day(2021, 1, 1),
            brand: "Acme".to_string(),
        });
        self
    }

    /// Sale at noon UTC on `date`, priced at the product's list price when
    /// the product is known
    pub fn sale(mut self, user_id: u32, product_id: u32, date: NaiveDate, quantity: u32) -> Self {
        let product = self
            .products
            .iter()
            .find(|p| p.id == product_id)
            .cloned()
            .expect("fixture sale needs a known product; use sale_snapshot otherwise");
        let id = self.sales.len() as u64 + 1;
        self.sales.push(Sale {
            id,
            user_id,
            product_id,
            product_name: product.name.clone(),
            date: Utc
                .from_utc_datetime(&date.and_hms_opt(12, 0, 0).unwrap()),
            quantity,
            purchase_amount: product.price * quantity,
            category_id: product.category.id,
            category_name: product.category.name.clone(),
        });
        self
    }

    /// Sale for a product missing from the catalog, carrying only snapshot fields
    pub fn sale_snapshot(
        mut self,
        user_id: u32,
        product_id: u32,
        name: &str,
        category: (u32, &str),
        date: NaiveDate,
        amount_cents: u64,
    ) -> Self {
        let id = self.sales.len() as u64 + 1;
        self.sales.push(Sale {
            id,
            user_id,
            product_id,
            product_name: name.to_string(),
            date: Utc
                .from_utc_datetime(&date.and_hms_opt(12, 0, 0).unwrap()),
            quantity: 1,
            purchase_amount: Money::from_cents(amount_cents),
            category_id: category.0,
            category_name: category.1.to_string(),
        });
        self
    }

    pub fn build(self) -> EventStore {
        EventStore::from_records(self.users, self.products, self.sales)
            .expect("fixture records are valid")
    }
}

/// Store used by most query tests:
/// - users 1 (age 16), 2 (age 22), 3 (age 40), 4 (age 70)
/// - Electronics (1) and Clothing (2), one product each
/// - three weeks of March 2024 sales
pub fn retail_fixture() -> EventStore {
    StoreFixture::new()
        .user(1, 16, Gender::Male)
        .user(2, 22, Gender::Female)
        .user(3, 40, Gender::Female)
        .user(4, 70, Gender::Male)
        .product(1, "Smart Watch", (1, "Electronics"), 25_000)
        .product(2, "Winter Jacket", (2, "Clothing"), 8_000)
        // week of Sunday 2024-03-03
        .sale(1, 1, day(2024, 3, 3), 1)
        .sale(2, 2, day(2024, 3, 4), 2)
        .sale(2, 1, day(2024, 3, 5), 1)
        // week of Sunday 2024-03-10: only Electronics
        .sale(3, 1, day(2024, 3, 12), 1)
        // week of Sunday 2024-03-17: only Electronics
        .sale(4, 1, day(2024, 3, 18), 3)
        .sale(3, 1, day(2024, 3, 20), 1)
        .build()
}

/// Seeded synthetic store covering January-April 2024
pub fn generated_store(seed: u64) -> EventStore {
    DataGenerator::new(GeneratorConfig {
        user_count: 60,
        product_count: 40,
        start_date: day(2024, 1, 1),
        end_date: day(2024, 4, 30),
        seed: Some(seed),
    })
    .expect("valid generator config")
    .generate()
    .expect("generated store is valid")
}
