//! The product model as stored in the static catalog file.

use serde::{Deserialize, Serialize};

use super::attributes::{Badge, FragranceFamily, Gender};
use super::id::ProductId;
use super::price::Price;

/// A purchasable size of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSize {
    /// Size label, e.g. `"50ml"`.
    pub size: String,
    /// Unit price of this size.
    pub price: Price,
}

/// Top, heart and base notes. Descriptive only.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FragranceNotes {
    #[serde(default)]
    pub top: Vec<String>,
    #[serde(default)]
    pub heart: Vec<String>,
    #[serde(default)]
    pub base: Vec<String>,
}

/// A fragrance in the catalog.
///
/// Loaded once at startup and never mutated afterwards. `sizes` is
/// non-empty and its first entry is the default variant; [`Catalog::new`]
/// checks this before any product is served.
///
/// [`Catalog::new`]: crate::Catalog::new
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// URL-safe unique key used by product pages.
    pub slug: String,
    /// Headline price shown on cards. Filtering and sorting use
    /// [`Product::min_price`] instead.
    #[serde(default)]
    pub price: Price,
    pub sizes: Vec<ProductSize>,
    pub gender: Gender,
    #[serde(default)]
    pub badges: Vec<Badge>,
    #[serde(default)]
    pub notes: FragranceNotes,
    #[serde(default)]
    pub families: Vec<FragranceFamily>,
    /// Perfume oil concentration in percent.
    #[serde(default)]
    pub concentration: u8,
    #[serde(default)]
    pub longevity: String,
    #[serde(default)]
    pub sillage: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub gallery: Vec<String>,
    pub in_stock: bool,
    /// Rank used only by the popularity sort; higher is more popular.
    #[serde(default)]
    pub popularity: u32,
    #[serde(default)]
    pub description: String,
}

impl Product {
    /// The first listed size, preselected on product pages and used by
    /// quick-order buttons on product cards.
    #[must_use]
    pub fn default_size(&self) -> Option<&ProductSize> {
        self.sizes.first()
    }

    /// Price of the cheapest size.
    #[must_use]
    pub fn min_price(&self) -> Price {
        self.sizes
            .iter()
            .map(|s| s.price)
            .min()
            .unwrap_or(Price::ZERO)
    }

    /// Look up a size by its exact label.
    #[must_use]
    pub fn size(&self, label: &str) -> Option<&ProductSize> {
        self.sizes.iter().find(|s| s.size == label)
    }

    /// Whether the product is sold in the given size.
    #[must_use]
    pub fn has_size(&self, label: &str) -> bool {
        self.size(label).is_some()
    }

    /// Price for a selected size, falling back to the default size when the
    /// label is unknown.
    #[must_use]
    pub fn price_for(&self, label: &str) -> Price {
        self.size(label)
            .or_else(|| self.default_size())
            .map_or(Price::ZERO, |s| s.price)
    }

    #[must_use]
    pub fn has_badge(&self, badge: Badge) -> bool {
        self.badges.contains(&badge)
    }

    #[must_use]
    pub fn has_family(&self, family: FragranceFamily) -> bool {
        self.families.contains(&family)
    }

    /// Home page picks: anything tagged New or Best Seller.
    #[must_use]
    pub fn is_featured(&self) -> bool {
        self.has_badge(Badge::New) || self.has_badge(Badge::BestSeller)
    }
}
