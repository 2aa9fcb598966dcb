//! Product route handlers.

use std::str::FromStr;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use isha_core::{
    Availability, CatalogQuery, Filters, OrderLink, Price, PriceRange, Product, SortKey,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Product display data: the catalog entry plus derived fields.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView<'a> {
    #[serde(flatten)]
    pub product: &'a Product,
    /// Cheapest size, used for "from" prices and price sorting.
    pub min_price: Price,
    /// `min_price` formatted for display, e.g. `₦15,000`.
    pub display_price: String,
}

impl<'a> From<&'a Product> for ProductView<'a> {
    fn from(product: &'a Product) -> Self {
        let min_price = product.min_price();
        Self {
            product,
            min_price,
            display_price: min_price.to_string(),
        }
    }
}

/// Product listing response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListView<'a> {
    pub products: Vec<ProductView<'a>>,
    pub total: usize,
    pub sort: SortKey,
    /// Number of filter groups narrowing the result, for the filter badge.
    pub active_filters: usize,
}

/// Product detail response.
#[derive(Debug, Serialize)]
pub struct ProductDetailView<'a> {
    pub product: ProductView<'a>,
    pub related: Vec<ProductView<'a>>,
}

/// Quick order response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickOrderView {
    pub size: String,
    pub price: Price,
    #[serde(flatten)]
    pub order: OrderLink,
}

/// Listing query parameters. List-valued parameters are comma-separated.
#[derive(Debug, Default, Deserialize)]
pub struct ProductsQuery {
    pub search: Option<String>,
    pub sort: Option<String>,
    pub gender: Option<String>,
    pub family: Option<String>,
    pub size: Option<String>,
    pub availability: Option<String>,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
}

impl TryFrom<ProductsQuery> for CatalogQuery {
    type Error = AppError;

    fn try_from(params: ProductsQuery) -> Result<Self> {
        let sort = params
            .sort
            .as_deref()
            .map(SortKey::from_str)
            .transpose()
            .map_err(AppError::BadRequest)?
            .unwrap_or_default();

        let availability = params
            .availability
            .as_deref()
            .map(Availability::from_str)
            .transpose()
            .map_err(AppError::BadRequest)?
            .unwrap_or_default();

        let price_range = match (params.min_price, params.max_price) {
            (None, None) => None,
            (min, max) => {
                let min = Price::new(min.unwrap_or(0));
                let max = max.map_or(PriceRange::SLIDER_MAX, Price::new);
                if min > max {
                    return Err(AppError::BadRequest(format!(
                        "min_price {} is above max_price {}",
                        min.amount(),
                        max.amount()
                    )));
                }
                Some(PriceRange::new(min, max))
            }
        };

        Ok(Self {
            search: params.search.unwrap_or_default(),
            filters: Filters {
                price_range,
                genders: parse_list(params.gender.as_deref())?,
                families: parse_list(params.family.as_deref())?,
                sizes: parse_list(params.size.as_deref())?,
                availability,
            },
            sort,
        })
    }
}

/// Split a comma-separated parameter, skipping blanks.
fn parse_list<T>(raw: Option<&str>) -> Result<Vec<T>>
where
    T: FromStr,
    T::Err: ToString,
{
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<T>().map_err(|e| AppError::BadRequest(e.to_string())))
        .collect()
}

/// Quick order query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct OrderQuery {
    pub size: Option<String>,
}

/// Search, filter and sort the catalog.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<ProductsQuery>,
) -> Result<Json<serde_json::Value>> {
    let query = CatalogQuery::try_from(params)?;
    let products = state.catalog().query(&query);

    tracing::debug!(results = products.len(), "catalog query");

    let view = ProductListView {
        total: products.len(),
        products: products.into_iter().map(ProductView::from).collect(),
        sort: query.sort,
        active_filters: query.filters.active_count(),
    };

    to_json(&view)
}

/// Home page selection.
#[instrument(skip(state))]
pub async fn featured(State(state): State<AppState>) -> Result<Json<serde_json::Value>> {
    let products: Vec<ProductView<'_>> = state
        .catalog()
        .featured()
        .into_iter()
        .map(ProductView::from)
        .collect();

    to_json(&products)
}

/// Product detail with related products.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<serde_json::Value>> {
    let product = find_product(&state, &slug)?;

    let view = ProductDetailView {
        product: ProductView::from(product),
        related: state
            .catalog()
            .related(product)
            .into_iter()
            .map(ProductView::from)
            .collect(),
    };

    to_json(&view)
}

/// WhatsApp quick order for one size of a product.
///
/// Without a `size` parameter the first listed size is ordered.
#[instrument(skip(state))]
pub async fn order(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<OrderQuery>,
) -> Result<Json<QuickOrderView>> {
    let product = find_product(&state, &slug)?;

    if !product.in_stock {
        return Err(AppError::Conflict(format!("{} is out of stock", product.name)));
    }

    let size = match params.size.as_deref().map(str::trim) {
        Some(label) if !label.is_empty() => product.size(label).ok_or_else(|| {
            AppError::BadRequest(format!("{} has no size {label}", product.name))
        })?,
        _ => product
            .default_size()
            .ok_or_else(|| AppError::Internal(format!("{} has no sizes", product.id)))?,
    };

    let order = state
        .handoff()
        .product_order(&product.name, &size.size, size.price);
    tracing::info!(product_id = %product.id, size = %size.size, "quick order link created");

    Ok(Json(QuickOrderView {
        size: size.size.clone(),
        price: size.price,
        order,
    }))
}

pub(crate) fn find_product<'a>(state: &'a AppState, slug: &str) -> Result<&'a Product> {
    state
        .catalog()
        .by_slug(slug)
        .ok_or_else(|| AppError::NotFound(format!("product {slug}")))
}

/// Views borrow from the catalog, so serialize before leaving the handler.
fn to_json<T: Serialize>(view: &T) -> Result<Json<serde_json::Value>> {
    serde_json::to_value(view)
        .map(Json)
        .map_err(|e| AppError::Internal(e.to_string()))
}
