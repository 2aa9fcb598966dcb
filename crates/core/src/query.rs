//! Catalog search, filter and sort pipeline.
//!
//! [`run`] is a pure function of the product list and a [`CatalogQuery`]. It
//! is cheap enough over a storefront-sized catalog to re-run on every
//! keystroke, so nothing is cached. All filters are AND-combined and a
//! filter left at its default imposes no constraint.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use crate::types::{Availability, Badge, FragranceFamily, Gender, Price, Product};

/// Inclusive bounds on a product's cheapest size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Price,
    pub max: Price,
}

impl PriceRange {
    /// Upper end of the shop's price slider.
    pub const SLIDER_MAX: Price = Price::new(100_000);

    #[must_use]
    pub const fn new(min: Price, max: Price) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn contains(&self, price: Price) -> bool {
        self.min <= price && price <= self.max
    }

    /// Whether the range is narrower than the full slider.
    #[must_use]
    pub fn is_narrowed(&self) -> bool {
        self.min > Price::ZERO || self.max < Self::SLIDER_MAX
    }
}

/// Shop filter selection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filters {
    #[serde(default)]
    pub price_range: Option<PriceRange>,
    #[serde(default)]
    pub genders: Vec<Gender>,
    /// Called "notes" in the shop UI; matched against product families.
    #[serde(default)]
    pub families: Vec<FragranceFamily>,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub availability: Availability,
}

impl Filters {
    /// Number of filter groups that currently constrain the result, as shown
    /// on the "Filters" badge.
    #[must_use]
    pub fn active_count(&self) -> usize {
        [
            !self.genders.is_empty(),
            !self.families.is_empty(),
            !self.sizes.is_empty(),
            self.availability != Availability::All,
            self.price_range.is_some_and(|r| r.is_narrowed()),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    /// Whether `product` passes every filter.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(range) = self.price_range
            && !range.contains(product.min_price())
        {
            return false;
        }

        if !self.genders.is_empty() && !self.genders.contains(&product.gender) {
            return false;
        }

        if !self.families.is_empty() && !self.families.iter().any(|f| product.has_family(*f)) {
            return false;
        }

        if !self.sizes.is_empty() && !self.sizes.iter().any(|s| product.has_size(s)) {
            return false;
        }

        self.availability.admits(product.in_stock)
    }
}

/// Result ordering. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    /// Most popular first.
    #[default]
    Popularity,
    /// Products tagged New first. Order within each group is left as is.
    Newest,
    /// Cheapest size, low to high.
    PriceAsc,
    /// Cheapest size, high to low.
    PriceDesc,
    /// Name A-Z.
    Name,
}

impl SortKey {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Popularity => "popularity",
            Self::Newest => "newest",
            Self::PriceAsc => "priceAsc",
            Self::PriceDesc => "priceDesc",
            Self::Name => "name",
        }
    }

    fn sort(self, products: &mut [&Product]) {
        match self {
            Self::Popularity => products.sort_by_key(|p| Reverse(p.popularity)),
            Self::Newest => products.sort_by_key(|p| !p.has_badge(Badge::New)),
            Self::PriceAsc => products.sort_by_key(|p| p.min_price()),
            Self::PriceDesc => products.sort_by_key(|p| Reverse(p.min_price())),
            Self::Name => products.sort_by(|a, b| {
                a.name
                    .to_lowercase()
                    .cmp(&b.name.to_lowercase())
                    .then_with(|| a.name.cmp(&b.name))
            }),
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.replace(['-', '_'], "").to_lowercase();
        match key.as_str() {
            "popularity" | "" => Ok(Self::Popularity),
            "newest" => Ok(Self::Newest),
            "priceasc" => Ok(Self::PriceAsc),
            "pricedesc" => Ok(Self::PriceDesc),
            "name" => Ok(Self::Name),
            _ => Err(format!("invalid sort key: {s}")),
        }
    }
}

/// Everything the shop page feeds into the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogQuery {
    /// Free-text search, matched case-insensitively against the product name
    /// and its family labels. Blank means no constraint.
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub filters: Filters,
    #[serde(default)]
    pub sort: SortKey,
}

impl CatalogQuery {
    fn matches_search(&self, product: &Product) -> bool {
        // The term is matched as typed, surrounding spaces included.
        let term = self.search.to_lowercase();
        if term.is_empty() {
            return true;
        }

        product.name.to_lowercase().contains(&term)
            || product
                .families
                .iter()
                .any(|f| f.as_str().to_lowercase().contains(&term))
    }
}

/// Filter `products` by `query` and sort the survivors.
///
/// The sort is stable, so products that compare equal keep catalog order.
#[must_use]
pub fn run<'a>(products: &'a [Product], query: &CatalogQuery) -> Vec<&'a Product> {
    let mut matched: Vec<&Product> = products
        .iter()
        .filter(|p| query.matches_search(p) && query.filters.matches(p))
        .collect();

    query.sort.sort(&mut matched);

    tracing::trace!(
        search = %query.search,
        sort = %query.sort,
        matched = matched.len(),
        "catalog query"
    );
    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.id.to_string()).collect()
    }

    fn query_with(filters: Filters) -> CatalogQuery {
        CatalogQuery {
            filters,
            ..CatalogQuery::default()
        }
    }

    #[test]
    fn test_default_query_returns_everything_by_popularity() {
        let products = fixtures::products();
        let result = run(&products, &CatalogQuery::default());
        assert_eq!(ids(&result), vec!["p1", "p2", "p5", "p4", "p6", "p3"]);
    }

    #[test]
    fn test_search_matches_name_case_insensitively() {
        let products = fixtures::products();
        let query = CatalogQuery {
            search: "ROSE".to_string(),
            ..CatalogQuery::default()
        };
        assert_eq!(ids(&run(&products, &query)), vec!["p1"]);
    }

    #[test]
    fn test_search_matches_family_labels() {
        let products = fixtures::products();
        let query = CatalogQuery {
            search: "fre".to_string(),
            sort: SortKey::Name,
            ..CatalogQuery::default()
        };
        // Citrus Bloom and Ocean Breeze are both Fresh.
        assert_eq!(ids(&run(&products, &query)), vec!["p3", "p4"]);
    }

    #[test]
    fn test_empty_search_is_no_constraint() {
        let products = fixtures::products();
        let query = CatalogQuery {
            search: String::new(),
            ..CatalogQuery::default()
        };
        assert_eq!(run(&products, &query).len(), products.len());
    }

    #[test]
    fn test_search_spaces_are_part_of_the_term() {
        let products = fixtures::products();
        let search = |term: &str| CatalogQuery {
            search: term.to_string(),
            ..CatalogQuery::default()
        };

        assert!(run(&products, &search("   ")).is_empty());
        // "Ocean Breeze" ends the name, so nothing follows the word.
        assert!(run(&products, &search("breeze ")).is_empty());
        assert_eq!(ids(&run(&products, &search("ocean "))), vec!["p4"]);
    }

    #[test]
    fn test_price_range_uses_cheapest_size_inclusive() {
        let products = fixtures::products();
        let query = query_with(Filters {
            price_range: Some(PriceRange::new(Price::new(12_000), Price::new(15_000))),
            ..Filters::default()
        });
        // p2 and p6 start at 15,000, p5 at 12,000. p1's 100ml is 18,000 but
        // its 50ml at 10,000 is what counts.
        let mut result = ids(&run(&products, &query));
        result.sort();
        assert_eq!(result, vec!["p2", "p5", "p6"]);
    }

    #[test]
    fn test_gender_family_and_size_filters() {
        let products = fixtures::products();

        let men = query_with(Filters {
            genders: vec![Gender::Men],
            ..Filters::default()
        });
        assert_eq!(ids(&run(&products, &men)), vec!["p4", "p6"]);

        let woody_or_gourmand = query_with(Filters {
            families: vec![FragranceFamily::Woody, FragranceFamily::Gourmand],
            ..Filters::default()
        });
        assert_eq!(ids(&run(&products, &woody_or_gourmand)), vec!["p2", "p5", "p6"]);

        let only_100ml = query_with(Filters {
            sizes: vec!["100ml".to_string()],
            ..Filters::default()
        });
        // Citrus Bloom is the only product without a 100ml size.
        assert!(!ids(&run(&products, &only_100ml)).contains(&"p3".to_string()));
        assert_eq!(run(&products, &only_100ml).len(), 5);
    }

    #[test]
    fn test_out_of_stock_returns_exactly_the_unavailable_product() {
        let products = fixtures::products();
        let query = query_with(Filters {
            availability: Availability::OutOfStock,
            ..Filters::default()
        });
        assert_eq!(ids(&run(&products, &query)), vec!["p4"]);

        let in_stock = query_with(Filters {
            availability: Availability::InStock,
            ..Filters::default()
        });
        assert_eq!(run(&products, &in_stock).len(), products.len() - 1);
    }

    #[test]
    fn test_adding_a_constraint_never_grows_the_result() {
        let products = fixtures::products();
        let base = CatalogQuery::default();
        let base_len = run(&products, &base).len();

        let constraints: Vec<Box<dyn Fn(&mut CatalogQuery)>> = vec![
            Box::new(|q| q.search = "o".to_string()),
            Box::new(|q| {
                q.filters.price_range = Some(PriceRange::new(Price::new(9_000), Price::new(20_000)));
            }),
            Box::new(|q| q.filters.genders.push(Gender::Women)),
            Box::new(|q| q.filters.families.push(FragranceFamily::Fresh)),
            Box::new(|q| q.filters.sizes.push("50ml".to_string())),
            Box::new(|q| q.filters.availability = Availability::InStock),
        ];

        let mut stacked = base;
        let mut previous = base_len;
        for constrain in &constraints {
            let mut single = CatalogQuery::default();
            constrain(&mut single);
            assert!(run(&products, &single).len() <= base_len);

            constrain(&mut stacked);
            let now = run(&products, &stacked).len();
            assert!(now <= previous);
            previous = now;
        }
    }

    #[test]
    fn test_price_asc_is_ordered_by_cheapest_size() {
        let products = fixtures::products();
        let query = CatalogQuery {
            sort: SortKey::PriceAsc,
            ..CatalogQuery::default()
        };
        let result = run(&products, &query);
        assert!(
            result
                .windows(2)
                .all(|pair| pair[0].min_price() <= pair[1].min_price())
        );
        // p2 and p6 tie at 15,000 and keep catalog order.
        assert_eq!(ids(&result), vec!["p3", "p1", "p5", "p2", "p6", "p4"]);
    }

    #[test]
    fn test_price_desc() {
        let products = fixtures::products();
        let query = CatalogQuery {
            sort: SortKey::PriceDesc,
            ..CatalogQuery::default()
        };
        assert_eq!(
            ids(&run(&products, &query)),
            vec!["p4", "p2", "p6", "p5", "p1", "p3"]
        );
    }

    #[test]
    fn test_newest_puts_new_first_and_keeps_relative_order() {
        let products = fixtures::products();
        let query = CatalogQuery {
            sort: SortKey::Newest,
            ..CatalogQuery::default()
        };
        assert_eq!(
            ids(&run(&products, &query)),
            vec!["p2", "p4", "p1", "p3", "p5", "p6"]
        );
    }

    #[test]
    fn test_name_sort() {
        let products = fixtures::products();
        let query = CatalogQuery {
            sort: SortKey::Name,
            ..CatalogQuery::default()
        };
        assert_eq!(
            ids(&run(&products, &query)),
            vec!["p6", "p3", "p2", "p4", "p1", "p5"]
        );
    }

    #[test]
    fn test_active_count() {
        assert_eq!(Filters::default().active_count(), 0);

        let full_slider = Filters {
            price_range: Some(PriceRange::new(Price::ZERO, PriceRange::SLIDER_MAX)),
            ..Filters::default()
        };
        assert_eq!(full_slider.active_count(), 0);

        let busy = Filters {
            price_range: Some(PriceRange::new(Price::new(5_000), PriceRange::SLIDER_MAX)),
            genders: vec![Gender::Men],
            families: vec![FragranceFamily::Woody],
            sizes: vec!["50ml".to_string()],
            availability: Availability::InStock,
        };
        assert_eq!(busy.active_count(), 5);
    }

    #[test]
    fn test_sort_key_from_str() {
        assert_eq!("priceAsc".parse::<SortKey>(), Ok(SortKey::PriceAsc));
        assert_eq!("price-desc".parse::<SortKey>(), Ok(SortKey::PriceDesc));
        assert_eq!("".parse::<SortKey>(), Ok(SortKey::Popularity));
        assert!("random".parse::<SortKey>().is_err());
    }
}
