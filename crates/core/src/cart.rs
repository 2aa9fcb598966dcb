//! Cart state container.
//!
//! The cart is a plain value: a list of line items plus an open/closed flag
//! for the cart drawer. Every change goes through [`CartAction`] and the pure
//! transition function [`reduce`]. [`Cart`] wraps the state as an owned
//! handle with one method per action.
//!
//! # Invariants
//!
//! - At most one item per `(product_id, size)`; adding the same variant again
//!   bumps its quantity.
//! - Stored quantities are always at least 1. An item whose quantity drops to
//!   zero or below is removed.
//! - Totals are recomputed from the items on every read.
//! - Item mutations never touch `is_open`, and visibility changes never touch
//!   the items.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::types::{CartItemId, Price, ProductId};

/// What a caller supplies when adding to the cart.
///
/// Name, image and price are a snapshot taken at add time; later catalog
/// edits do not reach items already in a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCartItem {
    pub product_id: ProductId,
    pub name: String,
    pub image: String,
    pub size: String,
    pub price: Price,
    pub quantity: u32,
}

/// A line in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: CartItemId,
    pub product_id: ProductId,
    pub name: String,
    pub image: String,
    pub size: String,
    pub price: Price,
    pub quantity: u32,
}

impl CartItem {
    fn from_new(item: NewCartItem, added_at_ms: i64) -> Self {
        Self {
            id: CartItemId::for_line(&item.product_id, &item.size, added_at_ms),
            product_id: item.product_id,
            name: item.name,
            image: item.image,
            size: item.size,
            price: item.price,
            quantity: item.quantity.max(1),
        }
    }

    /// `price * quantity`.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// Items plus drawer visibility.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartState {
    #[serde(default)]
    pub items: Vec<CartItem>,
    #[serde(default)]
    pub is_open: bool,
}

impl CartState {
    /// Sum of quantities.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Sum of line totals.
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.items.iter().map(CartItem::line_total).sum()
    }
}

/// Every way the cart can change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    /// Add a variant, merging with an existing line for the same
    /// `(product_id, size)`. `added_at_ms` becomes part of a new line's id.
    AddItem {
        item: NewCartItem,
        added_at_ms: i64,
    },
    /// Remove a line. Unknown ids are ignored.
    RemoveItem(CartItemId),
    /// Set a line's quantity. Zero or less removes the line; unknown ids are
    /// ignored.
    UpdateQuantity { id: CartItemId, quantity: i64 },
    /// Remove every line. Visibility is unchanged.
    ClearCart,
    ToggleCart,
    CloseCart,
}

/// Apply `action` to `state`.
#[must_use]
pub fn reduce(mut state: CartState, action: CartAction) -> CartState {
    match action {
        CartAction::AddItem { item, added_at_ms } => {
            let existing = state
                .items
                .iter_mut()
                .find(|i| i.product_id == item.product_id && i.size == item.size);

            match existing {
                Some(line) => {
                    line.quantity = line.quantity.saturating_add(item.quantity.max(1));
                }
                None => state.items.push(CartItem::from_new(item, added_at_ms)),
            }
        }
        CartAction::RemoveItem(id) => {
            state.items.retain(|i| i.id != id);
        }
        CartAction::UpdateQuantity { id, quantity } => {
            if let Some(line) = state.items.iter_mut().find(|i| i.id == id) {
                line.quantity = u32::try_from(quantity.max(0)).unwrap_or(u32::MAX);
            }
            state.items.retain(|i| i.quantity > 0);
        }
        CartAction::ClearCart => state.items.clear(),
        CartAction::ToggleCart => state.is_open = !state.is_open,
        CartAction::CloseCart => state.is_open = false,
    }
    state
}

/// Owned cart handle.
///
/// Create one per visitor (or load one from wherever the visitor's state
/// lives), mutate it through these methods, and hand it back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    state: CartState,
}

impl Cart {
    /// An empty, closed cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a single action.
    pub fn dispatch(&mut self, action: CartAction) {
        tracing::debug!(?action, "cart action");
        self.state = reduce(std::mem::take(&mut self.state), action);
    }

    /// Add a variant, returning the id of the line that now holds it.
    pub fn add_item(&mut self, item: NewCartItem) -> CartItemId {
        let added_at_ms = Utc::now().timestamp_millis();
        let id = self
            .state
            .items
            .iter()
            .find(|i| i.product_id == item.product_id && i.size == item.size)
            .map_or_else(
                || CartItemId::for_line(&item.product_id, &item.size, added_at_ms),
                |line| line.id.clone(),
            );

        tracing::info!(product_id = %item.product_id, size = %item.size, "added to cart");
        self.dispatch(CartAction::AddItem { item, added_at_ms });
        id
    }

    pub fn remove_item(&mut self, id: &CartItemId) {
        self.dispatch(CartAction::RemoveItem(id.clone()));
    }

    pub fn update_quantity(&mut self, id: &CartItemId, quantity: i64) {
        self.dispatch(CartAction::UpdateQuantity {
            id: id.clone(),
            quantity,
        });
    }

    pub fn clear(&mut self) {
        self.dispatch(CartAction::ClearCart);
    }

    pub fn toggle(&mut self) {
        self.dispatch(CartAction::ToggleCart);
    }

    pub fn close(&mut self) {
        self.dispatch(CartAction::CloseCart);
    }

    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.state.items
    }

    #[must_use]
    pub fn item(&self, id: &CartItemId) -> Option<&CartItem> {
        self.state.items.iter().find(|i| &i.id == id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.items.is_empty()
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.state.is_open
    }

    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.state.total_items()
    }

    #[must_use]
    pub fn total_price(&self) -> Price {
        self.state.total_price()
    }

    #[must_use]
    pub const fn state(&self) -> &CartState {
        &self.state
    }

    #[must_use]
    pub fn into_state(self) -> CartState {
        self.state
    }
}

impl From<CartState> for Cart {
    fn from(state: CartState) -> Self {
        Self { state }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn new_item(product: &str, size: &str, price: u64, quantity: u32) -> NewCartItem {
        NewCartItem {
            product_id: ProductId::new(product),
            name: format!("Product {product}"),
            image: String::new(),
            size: size.to_string(),
            price: Price::new(price),
            quantity,
        }
    }

    fn add(state: CartState, item: NewCartItem, at: i64) -> CartState {
        reduce(
            state,
            CartAction::AddItem {
                item,
                added_at_ms: at,
            },
        )
    }

    #[test]
    fn test_add_creates_item_with_derived_id() {
        let state = add(CartState::default(), new_item("p1", "50ml", 10_000, 1), 1_700);
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.items[0].id.as_str(), "p1-50ml-1700");
        assert_eq!(state.items[0].quantity, 1);
    }

    #[test]
    fn test_repeated_adds_merge_by_product_and_size() {
        let mut state = CartState::default();
        for (n, qty) in [1_u32, 2, 4, 1].into_iter().enumerate() {
            state = add(state, new_item("p1", "50ml", 10_000, qty), i64::try_from(n).unwrap());
        }

        assert_eq!(state.items.len(), 1);
        assert_eq!(state.items[0].quantity, 8);
        // The id of the first add survives the merges.
        assert_eq!(state.items[0].id.as_str(), "p1-50ml-0");
    }

    #[test]
    fn test_different_sizes_are_separate_lines() {
        let state = add(CartState::default(), new_item("p1", "50ml", 10_000, 1), 1);
        let state = add(state, new_item("p1", "100ml", 18_000, 1), 2);
        let state = add(state, new_item("p2", "50ml", 15_000, 1), 3);
        assert_eq!(state.items.len(), 3);
        assert_eq!(state.total_items(), 3);
        assert_eq!(state.total_price(), Price::new(43_000));
    }

    #[test]
    fn test_add_with_zero_quantity_stores_one() {
        let state = add(CartState::default(), new_item("p1", "50ml", 10_000, 0), 1);
        assert_eq!(state.items[0].quantity, 1);
    }

    #[test]
    fn test_add_then_set_zero_empties_cart() {
        let mut cart = Cart::new();
        cart.add_item(new_item("p1", "50ml", 10_000, 1));
        let id = cart.add_item(new_item("p1", "50ml", 10_000, 2));

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.item(&id).map(|i| i.quantity), Some(3));
        assert_eq!(cart.total_price(), Price::new(30_000));

        cart.update_quantity(&id, 0);
        assert!(cart.is_empty());
        assert_eq!(cart.total_items(), 0);
        assert_eq!(cart.total_price(), Price::ZERO);
    }

    #[test]
    fn test_update_quantity_sets_exact_value_or_removes() {
        let state = add(CartState::default(), new_item("p1", "50ml", 10_000, 3), 1);
        let id = state.items[0].id.clone();

        let state = reduce(
            state,
            CartAction::UpdateQuantity {
                id: id.clone(),
                quantity: 7,
            },
        );
        assert_eq!(state.items[0].quantity, 7);

        let state = reduce(state, CartAction::UpdateQuantity { id, quantity: -4 });
        assert!(state.items.is_empty());
    }

    #[test]
    fn test_unknown_ids_are_no_ops() {
        let state = add(CartState::default(), new_item("p1", "50ml", 10_000, 2), 1);
        let before = state.clone();
        let missing = CartItemId::new("nope");

        let state = reduce(state, CartAction::RemoveItem(missing.clone()));
        assert_eq!(state, before);

        let state = reduce(
            state,
            CartAction::UpdateQuantity {
                id: missing,
                quantity: 0,
            },
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_remove_item() {
        let state = add(CartState::default(), new_item("p1", "50ml", 10_000, 1), 1);
        let state = add(state, new_item("p2", "50ml", 15_000, 1), 2);
        let first = state.items[0].id.clone();

        let state = reduce(state, CartAction::RemoveItem(first));
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.items[0].product_id.as_str(), "p2");
    }

    #[test]
    fn test_totals_match_items_after_any_sequence() {
        let mut cart = Cart::new();
        let a = cart.add_item(new_item("p1", "50ml", 10_000, 2));
        let b = cart.add_item(new_item("p2", "100ml", 25_000, 1));
        cart.add_item(new_item("p3", "50ml", 8_000, 5));
        cart.update_quantity(&b, 3);
        cart.remove_item(&a);
        cart.add_item(new_item("p1", "50ml", 10_000, 1));

        let expected_items: u64 = cart.items().iter().map(|i| u64::from(i.quantity)).sum();
        let expected_price: u64 = cart
            .items()
            .iter()
            .map(|i| i.price.amount() * u64::from(i.quantity))
            .sum();
        assert_eq!(cart.total_items(), expected_items);
        assert_eq!(cart.total_price().amount(), expected_price);
        assert_eq!(cart.total_items(), 9);
        assert_eq!(cart.total_price(), Price::new(125_000));
    }

    #[test]
    fn test_visibility_is_independent_of_items() {
        let mut cart = Cart::new();
        assert!(!cart.is_open());

        cart.toggle();
        assert!(cart.is_open());

        let id = cart.add_item(new_item("p1", "50ml", 10_000, 1));
        cart.update_quantity(&id, 2);
        cart.clear();
        assert!(cart.is_open());
        assert!(cart.is_empty());

        cart.toggle();
        assert!(!cart.is_open());
        cart.close();
        assert!(!cart.is_open());

        cart.add_item(new_item("p1", "50ml", 10_000, 1));
        cart.toggle();
        cart.close();
        assert!(!cart.is_open());
        assert_eq!(cart.total_items(), 1);
    }

    #[test]
    fn test_add_item_returns_id_of_the_holding_line() {
        let mut cart = Cart::new();

        let first = cart.add_item(new_item("p1", "50ml", 10_000, 1));
        assert_eq!(cart.item(&first).map(|i| i.quantity), Some(1));

        let merged = cart.add_item(new_item("p1", "50ml", 10_000, 2));
        assert_eq!(merged, first);
        assert_eq!(cart.item(&merged).map(|i| i.quantity), Some(3));

        let other = cart.add_item(new_item("p1", "100ml", 18_000, 1));
        assert_ne!(other, first);
        assert_eq!(cart.item(&other).map(|i| i.size.as_str()), Some("100ml"));
    }

    #[test]
    fn test_item_snapshot_is_kept() {
        let mut cart = Cart::new();
        let id = cart.add_item(new_item("p1", "50ml", 10_000, 1));
        // A later add at a different price merges quantity but keeps the
        // original snapshot.
        cart.add_item(new_item("p1", "50ml", 99_000, 1));
        let line = cart.item(&id).unwrap();
        assert_eq!(line.price, Price::new(10_000));
        assert_eq!(line.quantity, 2);
    }

    #[test]
    fn test_state_serde_round_trip_for_session_storage() {
        let mut cart = Cart::new();
        cart.add_item(new_item("p1", "50ml", 10_000, 2));
        cart.toggle();

        let json = serde_json::to_value(cart.state()).unwrap();
        assert_eq!(json["isOpen"], true);
        assert_eq!(json["items"][0]["productId"], "p1");

        let restored: CartState = serde_json::from_value(json).unwrap();
        assert_eq!(Cart::from(restored), cart);
    }
}
