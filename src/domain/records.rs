//! Domain Records
//!
//! The immutable facts held by the event store: who bought, what was bought,
//! and each individual sale. Records are never mutated after generation.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::money::Money;

pub type UserId = u32;
pub type ProductId = u32;
pub type CategoryId = u32;
pub type SaleId = u64;

/// Category identity as carried by products and denormalized onto sales
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryRef {
    pub id: CategoryId,
    pub name: String,
}

impl CategoryRef {
    pub fn new(id: CategoryId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MaritalStatus {
    Single,
    Married,
    Divorced,
}

impl MaritalStatus {
    pub const ALL: [MaritalStatus; 3] = [
        MaritalStatus::Single,
        MaritalStatus::Married,
        MaritalStatus::Divorced,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MaritalStatus::Single => "Single",
            MaritalStatus::Married => "Married",
            MaritalStatus::Divorced => "Divorced",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub city: String,
    pub state: String,
    pub country: String,
}

/// A customer profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    /// Age in years (1-90)
    pub age: u8,
    pub gender: Gender,
    pub occupation: String,
    pub marital_status: MaritalStatus,
    pub location: Location,
    pub registration_date: NaiveDate,
}

/// A catalog product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: CategoryRef,
    pub price: Money,
    pub stock: u32,
    /// Customer rating (1.0-5.0, one decimal)
    pub rating: f32,
    pub release_date: NaiveDate,
    pub brand: String,
}

/// A single purchase.
///
/// `product_name` and `category_*` are snapshots taken when the sale was
/// generated; they are the fallback when the product no longer resolves.
///
/// # Invariants
/// - `quantity` > 0
/// - `purchase_amount` == unit price after discount × quantity, rounded to cents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub id: SaleId,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub product_name: String,
    pub date: DateTime<Utc>,
    pub quantity: u32,
    pub purchase_amount: Money,
    pub category_id: CategoryId,
    pub category_name: String,
}

impl Sale {
    /// Calendar day (UTC) the sale belongs to
    pub fn day(&self) -> NaiveDate {
        self.date.date_naive()
    }

    /// Snapshot of the category carried on the sale itself
    pub fn category(&self) -> CategoryRef {
        CategoryRef::new(self.category_id, self.category_name.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_sale_day_is_utc_calendar_day() {
        let sale = Sale {
            id: 1,
            user_id: 7,
            product_id: 3,
            product_name: "Coffee Maker".to_string(),
            date: Utc.with_ymd_and_hms(2024, 3, 5, 23, 59, 59).unwrap(),
            quantity: 2,
            purchase_amount: Money::from_cents(5000),
            category_id: 3,
            category_name: "Home & Kitchen".to_string(),
        };

        assert_eq!(sale.day(), NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert_eq!(sale.category(), CategoryRef::new(3, "Home & Kitchen"));
    }

    #[test]
    fn test_gender_serialization() {
        let json = serde_json::to_string(&Gender::Female).unwrap();
        assert_eq!(json, r#""Female""#);
        assert_eq!(Gender::Male.as_str(), "Male");
    }
}
