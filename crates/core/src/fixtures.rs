//! Shared test data.

use crate::catalog::Catalog;
use crate::types::{
    Badge, FragranceFamily, FragranceNotes, Gender, Price, Product, ProductId, ProductSize,
};

fn sizes(list: &[(&str, u64)]) -> Vec<ProductSize> {
    list.iter()
        .map(|(size, price)| ProductSize {
            size: (*size).to_string(),
            price: Price::new(*price),
        })
        .collect()
}

/// An in-stock Women's floral with sizes 50ml (10,000) and 100ml (18,000).
pub fn product(id: &str, name: &str) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        slug: name.to_lowercase().replace(' ', "-"),
        price: Price::new(10_000),
        sizes: sizes(&[("50ml", 10_000), ("100ml", 18_000)]),
        gender: Gender::Women,
        badges: Vec::new(),
        notes: FragranceNotes::default(),
        families: vec![FragranceFamily::Floral],
        concentration: 20,
        longevity: "6-8 hours".to_string(),
        sillage: "Moderate".to_string(),
        image: format!("/images/{id}.jpg"),
        gallery: Vec::new(),
        in_stock: true,
        popularity: 50,
        description: String::new(),
    }
}

/// Six products covering every gender, both sizes, one out-of-stock item
/// and every badge.
pub fn products() -> Vec<Product> {
    let mut rose = product("p1", "Rose Elegance");
    rose.badges = vec![Badge::BestSeller];
    rose.popularity = 95;

    let mut midnight = product("p2", "Midnight Obsession");
    midnight.gender = Gender::Unisex;
    midnight.families = vec![FragranceFamily::Oriental, FragranceFamily::Woody];
    midnight.sizes = sizes(&[("50ml", 15_000), ("100ml", 25_000)]);
    midnight.badges = vec![Badge::New];
    midnight.popularity = 88;

    let mut citrus = product("p3", "Citrus Bloom");
    citrus.families = vec![FragranceFamily::Citrus, FragranceFamily::Fresh];
    citrus.sizes = sizes(&[("50ml", 8_000)]);
    citrus.popularity = 60;

    let mut ocean = product("p4", "Ocean Breeze");
    ocean.gender = Gender::Men;
    ocean.families = vec![FragranceFamily::Aquatic, FragranceFamily::Fresh];
    ocean.sizes = sizes(&[("100ml", 22_000)]);
    ocean.badges = vec![Badge::New];
    ocean.in_stock = false;
    ocean.popularity = 70;

    let mut vanilla = product("p5", "Vanilla Dreams");
    vanilla.families = vec![FragranceFamily::Gourmand];
    vanilla.sizes = sizes(&[("50ml", 12_000), ("100ml", 20_000)]);
    vanilla.badges = vec![Badge::LimitedEdition];
    vanilla.popularity = 75;

    let mut cedar = product("p6", "Cedar Noir");
    cedar.gender = Gender::Men;
    cedar.families = vec![FragranceFamily::Woody];
    cedar.sizes = sizes(&[("50ml", 15_000), ("100ml", 26_000)]);
    cedar.popularity = 65;

    vec![rose, midnight, citrus, ocean, vanilla, cedar]
}

#[allow(clippy::unwrap_used)]
pub fn catalog() -> Catalog {
    Catalog::new(products()).unwrap()
}
