//! Isha's Fragrance Core - catalog, cart and checkout logic.
//!
//! This crate holds everything the storefront needs to reason about products
//! and carts:
//! - `storefront` - JSON HTTP surface over these types
//! - `cli` - Operator tools for checking and querying the catalog
//!
//! # Architecture
//!
//! The core crate performs no I/O. The catalog is handed in as already-read
//! JSON, the cart is a plain value owned by whoever drives it, and checkout
//! only formats text and links. Opening the link is the caller's business.
//!
//! # Modules
//!
//! - [`types`] - IDs, prices and the product model
//! - [`catalog`] - Immutable catalog store with lookups
//! - [`query`] - Search, filter and sort pipeline
//! - [`cart`] - Reducer-style cart state container
//! - [`checkout`] - WhatsApp order message formatting

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod query;
pub mod types;

#[cfg(test)]
pub(crate) mod fixtures;

pub use cart::{Cart, CartAction, CartItem, CartState, NewCartItem};
pub use catalog::{Catalog, CatalogError};
pub use checkout::{Handoff, OrderLink};
pub use query::{CatalogQuery, Filters, PriceRange, SortKey};
pub use types::*;
