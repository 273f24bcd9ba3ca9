//! Domain module
//!
//! Core record types and business primitives.

pub mod error;
pub mod money;
pub mod records;

pub use error::DomainError;
pub use money::{Money, MoneyError};
pub use records::{
    CategoryId, CategoryRef, Gender, Location, MaritalStatus, Product, ProductId, Sale, SaleId,
    User, UserId,
};
