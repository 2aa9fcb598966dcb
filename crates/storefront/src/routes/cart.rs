//! Cart route handlers.
//!
//! Each visitor's session holds the key of their cart in the
//! [`CartStore`](crate::carts::CartStore). A handler validates its input
//! first, then applies its change in a single locked update so overlapping
//! requests from one visitor never lose each other's changes.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use isha_core::{Cart, CartItem, CartItemId, NewCartItem, OrderLink, Price};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use crate::carts::CartKey;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::models::session_keys;
use crate::routes::products::find_product;
use crate::state::AppState;

/// Cart line display data.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemView {
    #[serde(flatten)]
    pub item: CartItem,
    pub line_total: Price,
    pub display_price: String,
    pub display_line_total: String,
}

impl From<&CartItem> for CartItemView {
    fn from(item: &CartItem) -> Self {
        let line_total = item.line_total();
        Self {
            item: item.clone(),
            line_total,
            display_price: item.price.to_string(),
            display_line_total: line_total.to_string(),
        }
    }
}

/// Cart display data with derived totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total_items: u64,
    pub total_price: Price,
    pub display_total: String,
    pub is_open: bool,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        let total_price = cart.total_price();
        Self {
            items: cart.items().iter().map(CartItemView::from).collect(),
            total_items: cart.total_items(),
            total_price,
            display_total: total_price.to_string(),
            is_open: cart.is_open(),
        }
    }
}

/// Checkout response: the WhatsApp link plus what was ordered.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutView {
    #[serde(flatten)]
    pub order: OrderLink,
    pub total_items: u64,
    pub total_price: Price,
}

/// Add to cart request body.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub slug: String,
    pub size: Option<String>,
    pub quantity: Option<u32>,
}

/// Update quantity request body.
#[derive(Debug, Deserialize)]
pub struct UpdateQuantityRequest {
    pub quantity: i64,
}

// =============================================================================
// Cart Key Helpers
// =============================================================================

/// The visitor's cart key, if they have started a cart.
async fn existing_key(session: &Session) -> Result<Option<CartKey>> {
    Ok(session.get::<CartKey>(session_keys::CART).await?)
}

/// The visitor's cart key, allocating one on their first cart change.
async fn cart_key(state: &AppState, session: &Session) -> Result<CartKey> {
    if let Some(key) = existing_key(session).await? {
        return Ok(key);
    }

    let key = state.carts().allocate();
    session.insert(session_keys::CART, key).await?;
    Ok(key)
}

fn require_item(cart: &Cart, id: &CartItemId) -> Result<()> {
    if cart.item(id).is_some() {
        Ok(())
    } else {
        Err(AppError::NotFound(format!("cart item {id}")))
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Current cart.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<Json<CartView>> {
    let cart = match existing_key(&session).await? {
        Some(key) => state.carts().snapshot(key),
        None => Cart::new(),
    };
    Ok(Json(CartView::from(&cart)))
}

/// Add a product size to the cart.
///
/// The size is required; the product must exist and be in stock.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<AddToCartRequest>,
) -> Result<(StatusCode, Json<CartView>)> {
    let product = find_product(&state, &request.slug)?;

    let Some(label) = request.size.as_deref().map(str::trim).filter(|s| !s.is_empty()) else {
        return Err(AppError::BadRequest("Please select a size".to_string()));
    };
    let size = product
        .size(label)
        .ok_or_else(|| AppError::BadRequest(format!("{} has no size {label}", product.name)))?;

    if !product.in_stock {
        return Err(AppError::Conflict(format!("{} is out of stock", product.name)));
    }

    let item = NewCartItem {
        product_id: product.id.clone(),
        name: product.name.clone(),
        image: product.image.clone(),
        size: size.size.clone(),
        price: size.price,
        quantity: request.quantity.unwrap_or(1),
    };

    let key = cart_key(&state, &session).await?;
    let (id, view) = state.carts().update(key, |cart| {
        let id = cart.add_item(item);
        (id, CartView::from(&*cart))
    });

    add_breadcrumb(
        "cart",
        "Added to cart",
        &[("product_id", product.id.as_str()), ("item_id", id.as_str())],
    );

    Ok((StatusCode::CREATED, Json(view)))
}

/// Set a line's quantity. Zero or less removes the line.
#[instrument(skip(state, session))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
    Json(request): Json<UpdateQuantityRequest>,
) -> Result<Json<CartView>> {
    let id = CartItemId::from(id);
    let key = cart_key(&state, &session).await?;

    let view = state.carts().update(key, |cart| {
        require_item(cart, &id)?;
        cart.update_quantity(&id, request.quantity);
        Ok::<_, AppError>(CartView::from(&*cart))
    })?;

    Ok(Json(view))
}

/// Remove a line.
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Json<CartView>> {
    let id = CartItemId::from(id);
    let key = cart_key(&state, &session).await?;

    let view = state.carts().update(key, |cart| {
        require_item(cart, &id)?;
        cart.remove_item(&id);
        Ok::<_, AppError>(CartView::from(&*cart))
    })?;

    add_breadcrumb("cart", "Removed from cart", &[("item_id", id.as_str())]);
    Ok(Json(view))
}

/// Empty the cart. Drawer visibility is left as is.
#[instrument(skip(state, session))]
pub async fn clear(State(state): State<AppState>, session: Session) -> Result<Json<CartView>> {
    let key = cart_key(&state, &session).await?;
    let view = state.carts().update(key, |cart| {
        cart.clear();
        CartView::from(&*cart)
    });

    add_breadcrumb("cart", "Cart cleared", &[]);
    Ok(Json(view))
}

/// Flip the cart drawer open or closed.
#[instrument(skip(state, session))]
pub async fn toggle(State(state): State<AppState>, session: Session) -> Result<Json<CartView>> {
    let key = cart_key(&state, &session).await?;
    let view = state.carts().update(key, |cart| {
        cart.toggle();
        CartView::from(&*cart)
    });
    Ok(Json(view))
}

/// Close the cart drawer.
#[instrument(skip(state, session))]
pub async fn close(State(state): State<AppState>, session: Session) -> Result<Json<CartView>> {
    let key = cart_key(&state, &session).await?;
    let view = state.carts().update(key, |cart| {
        cart.close();
        CartView::from(&*cart)
    });
    Ok(Json(view))
}

/// Hand the cart off to WhatsApp.
///
/// Returns the order message and link. The cart keeps its items (the order
/// is not confirmed until the shop replies) but the drawer is closed.
#[instrument(skip(state, session))]
pub async fn checkout(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<CheckoutView>> {
    let Some(key) = existing_key(&session).await? else {
        return Err(AppError::BadRequest("Your cart is empty".to_string()));
    };

    let handoff = state.handoff();
    let view = state.carts().update(key, |cart| {
        if cart.is_empty() {
            return Err(AppError::BadRequest("Your cart is empty".to_string()));
        }

        let view = CheckoutView {
            order: handoff.cart_order(cart),
            total_items: cart.total_items(),
            total_price: cart.total_price(),
        };
        cart.close();
        Ok(view)
    })?;

    tracing::info!(
        items = view.total_items,
        total = view.total_price.amount(),
        "cart handed off to WhatsApp"
    );
    add_breadcrumb("checkout", "Cart handed off to WhatsApp", &[]);

    Ok(Json(view))
}
