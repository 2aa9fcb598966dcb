//! Core types for the fragrance storefront.
//!
//! This module provides type-safe wrappers for IDs and prices along with the
//! product model read from the catalog file.

pub mod attributes;
pub mod id;
pub mod price;
pub mod product;

pub use attributes::{Availability, Badge, FragranceFamily, Gender};
pub use id::{CartItemId, ProductId};
pub use price::Price;
pub use product::{FragranceNotes, Product, ProductSize};
