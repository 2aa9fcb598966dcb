//! Immutable catalog store.
//!
//! The catalog is read once at startup and shared read-only afterwards.
//! Invariants the rest of the crate relies on (every product has at least
//! one size, ids and slugs are unique) are checked here instead of being
//! re-checked at every use.

use std::collections::HashSet;

use thiserror::Error;

use crate::query::{self, CatalogQuery};
use crate::types::{Product, ProductId};

/// Number of products returned by [`Catalog::related`] and [`Catalog::featured`].
pub const SHOWCASE_LIMIT: usize = 4;

/// Errors raised while loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("product {0} has no sizes")]
    NoSizes(ProductId),
    #[error("duplicate product id: {0}")]
    DuplicateId(ProductId),
    #[error("duplicate product slug: {0}")]
    DuplicateSlug(String),
}

/// The full product list in catalog order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog, validating product invariants.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if a product has no sizes or if an id or slug
    /// appears more than once.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut ids = HashSet::new();
        let mut slugs = HashSet::new();

        for product in &products {
            if product.sizes.is_empty() {
                return Err(CatalogError::NoSizes(product.id.clone()));
            }
            if !ids.insert(product.id.as_str()) {
                return Err(CatalogError::DuplicateId(product.id.clone()));
            }
            if !slugs.insert(product.slug.as_str()) {
                return Err(CatalogError::DuplicateSlug(product.slug.clone()));
            }
        }

        tracing::debug!(products = products.len(), "catalog validated");
        Ok(Self { products })
    }

    /// Parse a catalog from the JSON array stored in the data file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Json` for malformed input, or any validation
    /// error from [`Catalog::new`].
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::new(products)
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    #[must_use]
    pub fn by_id(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    #[must_use]
    pub fn by_slug(&self, slug: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.slug == slug)
    }

    /// Run the search/filter/sort pipeline over the whole catalog.
    #[must_use]
    pub fn query(&self, query: &CatalogQuery) -> Vec<&Product> {
        query::run(&self.products, query)
    }

    /// Products to show under "You may also like".
    ///
    /// Up to four other products that share a fragrance family with
    /// `product` or target the same gender, in catalog order.
    #[must_use]
    pub fn related(&self, product: &Product) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.id != product.id)
            .filter(|p| {
                p.families.iter().any(|f| product.has_family(*f)) || p.gender == product.gender
            })
            .take(SHOWCASE_LIMIT)
            .collect()
    }

    /// Home page selection: the first four New or Best Seller products.
    #[must_use]
    pub fn featured(&self) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.is_featured())
            .take(SHOWCASE_LIMIT)
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::types::{FragranceFamily, Gender};

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.id.to_string()).collect()
    }

    #[test]
    fn test_new_rejects_empty_sizes() {
        let mut product = fixtures::product("p1", "Rose Elegance");
        product.sizes.clear();
        let err = Catalog::new(vec![product]).unwrap_err();
        assert!(matches!(err, CatalogError::NoSizes(id) if id.as_str() == "p1"));
    }

    #[test]
    fn test_new_rejects_duplicate_id() {
        let a = fixtures::product("p1", "Rose Elegance");
        let b = fixtures::product("p1", "Other Name");
        let err = Catalog::new(vec![a, b]).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(_)));
    }

    #[test]
    fn test_new_rejects_duplicate_slug() {
        let a = fixtures::product("p1", "Rose Elegance");
        let b = fixtures::product("p2", "Rose Elegance");
        let err = Catalog::new(vec![a, b]).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateSlug(slug) if slug == "rose-elegance"));
    }

    #[test]
    fn test_from_json_reports_parse_errors() {
        let err = Catalog::from_json("{not json").unwrap_err();
        assert!(matches!(err, CatalogError::Json(_)));
    }

    #[test]
    fn test_lookups() {
        let catalog = fixtures::catalog();
        assert_eq!(catalog.len(), 6);
        assert_eq!(
            catalog.by_slug("citrus-bloom").map(|p| p.id.as_str()),
            Some("p3")
        );
        assert_eq!(
            catalog.by_id(&ProductId::new("p4")).map(|p| p.name.as_str()),
            Some("Ocean Breeze")
        );
        assert!(catalog.by_slug("missing").is_none());
    }

    #[test]
    fn test_related_matches_family_or_gender_in_catalog_order() {
        let catalog = fixtures::catalog();
        let cedar = catalog.by_id(&ProductId::new("p6")).unwrap();

        // p2 shares Woody, p4 shares Men. Nothing else matches.
        assert_eq!(ids(&catalog.related(cedar)), vec!["p2", "p4"]);
    }

    #[test]
    fn test_related_excludes_self() {
        let catalog = fixtures::catalog();
        let rose = catalog.by_id(&ProductId::new("p1")).unwrap();

        // Only the other Women's products match; no family overlap elsewhere.
        assert_eq!(ids(&catalog.related(rose)), vec!["p3", "p5"]);
    }

    #[test]
    fn test_related_caps_at_four() {
        let products: Vec<Product> = (1..=7)
            .map(|n| fixtures::product(&format!("p{n}"), &format!("Rose {n}")))
            .collect();
        let catalog = Catalog::new(products).unwrap();
        let first = catalog.by_id(&ProductId::new("p1")).unwrap();

        assert_eq!(ids(&catalog.related(first)), vec!["p2", "p3", "p4", "p5"]);
    }

    #[test]
    fn test_related_with_no_overlap_is_empty() {
        let mut lone = fixtures::product("p1", "Lone Wolf");
        lone.gender = Gender::Men;
        lone.families = vec![FragranceFamily::Aquatic];
        let mut other = fixtures::product("p2", "Rose Elegance");
        other.gender = Gender::Women;
        let catalog = Catalog::new(vec![lone.clone(), other]).unwrap();
        assert!(catalog.related(&lone).is_empty());
    }

    #[test]
    fn test_featured_picks_new_and_best_sellers() {
        let catalog = fixtures::catalog();
        assert_eq!(ids(&catalog.featured()), vec!["p1", "p2", "p4"]);
    }
}
