//! Event Store Errors
//!
//! Error types raised while loading records into the store.

use crate::domain::{Money, SaleId};

/// Errors that can occur while building the event store
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    /// Two users share an id
    #[error("Duplicate user id: {0}")]
    DuplicateUser(u32),

    /// Two products share an id
    #[error("Duplicate product id: {0}")]
    DuplicateProduct(u32),

    /// Sale ids must be unique and strictly increasing
    #[error("Sale id {found} is not greater than previous id {previous}")]
    NonMonotonicSaleId { previous: SaleId, found: SaleId },

    /// Quantity must be a positive integer
    #[error("Sale {0} has zero quantity")]
    ZeroQuantity(SaleId),

    /// Amount cannot exceed list price × quantity
    #[error("Sale {sale_id} amount {amount} exceeds list price total {list_total}")]
    AmountExceedsListPrice {
        sale_id: SaleId,
        amount: Money,
        list_total: Money,
    },
}

impl StoreError {
    /// Check if this error concerns sale ordering
    pub fn is_ordering_error(&self) -> bool {
        matches!(self, StoreError::NonMonotonicSaleId { .. })
    }
}
