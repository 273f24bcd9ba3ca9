//! Event Store Repository
//!
//! In-memory, append-only record store. Records are loaded once through a
//! [`StoreBuilder`]; the finished [`EventStore`] exposes read access only and
//! is shared by reference (or `Arc`) with the query layer and forecast engine.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::{Product, ProductId, Sale, SaleId, User, UserId};

use super::error::StoreError;

/// Immutable store of users, products and sales
#[derive(Debug, Clone, Default)]
pub struct EventStore {
    users: Vec<User>,
    products: Vec<Product>,
    sales: Vec<Sale>,
    user_index: HashMap<UserId, usize>,
    product_index: HashMap<ProductId, usize>,
}

impl EventStore {
    /// Start loading a new store
    pub fn builder() -> StoreBuilder {
        StoreBuilder::default()
    }

    /// Build a store from complete record sets, validating every record
    pub fn from_records(
        users: Vec<User>,
        products: Vec<Product>,
        sales: Vec<Sale>,
    ) -> Result<Self, StoreError> {
        let mut builder = Self::builder();
        for user in users {
            builder.push_user(user)?;
        }
        for product in products {
            builder.push_product(product)?;
        }
        for sale in sales {
            builder.append_sale(sale)?;
        }
        Ok(builder.build())
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// All sales in id order
    pub fn sales(&self) -> &[Sale] {
        &self.sales
    }

    pub fn user(&self, id: UserId) -> Option<&User> {
        self.user_index.get(&id).map(|&i| &self.users[i])
    }

    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.product_index.get(&id).map(|&i| &self.products[i])
    }

    /// Earliest and latest sale timestamps, if any sales exist
    pub fn sale_span(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let first = self.sales.iter().map(|s| s.date).min()?;
        let last = self.sales.iter().map(|s| s.date).max()?;
        Some((first, last))
    }

    /// Calendar day of the most recent sale
    pub fn latest_sale_date(&self) -> Option<NaiveDate> {
        self.sale_span().map(|(_, last)| last.date_naive())
    }

    pub fn is_empty(&self) -> bool {
        self.sales.is_empty()
    }
}

/// Append-only loader for an [`EventStore`]
#[derive(Debug, Default)]
pub struct StoreBuilder {
    store: EventStore,
    last_sale_id: Option<SaleId>,
}

impl StoreBuilder {
    /// Add a user; ids must be unique
    pub fn push_user(&mut self, user: User) -> Result<&mut Self, StoreError> {
        if self.store.user_index.contains_key(&user.id) {
            return Err(StoreError::DuplicateUser(user.id));
        }
        self.store
            .user_index
            .insert(user.id, self.store.users.len());
        self.store.users.push(user);
        Ok(self)
    }

    /// Add a product; ids must be unique
    pub fn push_product(&mut self, product: Product) -> Result<&mut Self, StoreError> {
        if self.store.product_index.contains_key(&product.id) {
            return Err(StoreError::DuplicateProduct(product.id));
        }
        self.store
            .product_index
            .insert(product.id, self.store.products.len());
        self.store.products.push(product);
        Ok(self)
    }

    /// Append a sale.
    ///
    /// Sale ids must increase strictly. A sale may reference a product or user
    /// that is not in the store; queries fall back to its snapshot fields.
    pub fn append_sale(&mut self, sale: Sale) -> Result<&mut Self, StoreError> {
        if let Some(previous) = self.last_sale_id {
            if sale.id <= previous {
                return Err(StoreError::NonMonotonicSaleId {
                    previous,
                    found: sale.id,
                });
            }
        }

        if sale.quantity == 0 {
            return Err(StoreError::ZeroQuantity(sale.id));
        }

        // Discounts only ever lower the amount below list price
        if let Some(product) = self.store.product(sale.product_id) {
            let list_total = product.price * sale.quantity;
            if sale.purchase_amount > list_total {
                return Err(StoreError::AmountExceedsListPrice {
                    sale_id: sale.id,
                    amount: sale.purchase_amount,
                    list_total,
                });
            }
        }

        self.last_sale_id = Some(sale.id);
        self.store.sales.push(sale);
        Ok(self)
    }

    /// Finish loading
    pub fn build(self) -> EventStore {
        tracing::info!(
            users = self.store.users.len(),
            products = self.store.products.len(),
            sales = self.store.sales.len(),
            "Event store loaded"
        );
        self.store
    }
}
