//! Session-related types.

/// Session keys for visitor state.
pub mod keys {
    /// Key for the visitor's [`crate::carts::CartKey`].
    pub const CART: &str = "cart";
}
