//! Catalog inspection commands.

use std::fmt::Write as _;
use std::path::Path;

use clap::Args;
use isha_core::{
    Availability, Catalog, CatalogQuery, Filters, FragranceFamily, Gender, Price, PriceRange,
    Product, SortKey,
};
use isha_storefront::catalog::load_catalog;
use tracing::info;

/// Shop query flags. List flags take comma-separated values.
#[derive(Debug, Args)]
pub struct QueryArgs {
    /// Free-text search over names and fragrance families
    #[arg(long, default_value = "")]
    pub search: String,

    /// popularity, newest, price-asc, price-desc or name
    #[arg(long, default_value = "popularity")]
    pub sort: SortKey,

    #[arg(long, value_delimiter = ',')]
    pub gender: Vec<Gender>,

    #[arg(long, value_delimiter = ',')]
    pub family: Vec<FragranceFamily>,

    #[arg(long, value_delimiter = ',')]
    pub size: Vec<String>,

    /// all, in-stock or out-of-stock
    #[arg(long, default_value = "all")]
    pub availability: Availability,

    #[arg(long)]
    pub min_price: Option<u64>,

    #[arg(long)]
    pub max_price: Option<u64>,
}

impl From<QueryArgs> for CatalogQuery {
    fn from(args: QueryArgs) -> Self {
        let price_range = (args.min_price.is_some() || args.max_price.is_some()).then(|| {
            PriceRange::new(
                Price::new(args.min_price.unwrap_or(0)),
                args.max_price.map_or(PriceRange::SLIDER_MAX, Price::new),
            )
        });

        Self {
            search: args.search,
            filters: Filters {
                price_range,
                genders: args.gender,
                families: args.family,
                sizes: args.size,
                availability: args.availability,
            },
            sort: args.sort,
        }
    }
}

/// Load and validate a catalog file, then print a summary.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid catalog.
pub fn check(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = load_catalog(path)?;
    info!(products = catalog.len(), "Catalog is valid");

    #[allow(clippy::print_stdout)]
    {
        print!("{}", summary(&catalog));
    }
    Ok(())
}

/// Run a shop query against a catalog file and print the matches.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid catalog.
pub fn query(path: &Path, args: QueryArgs) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = load_catalog(path)?;
    let query = CatalogQuery::from(args);
    let products = catalog.query(&query);

    info!(
        results = products.len(),
        active_filters = query.filters.active_count(),
        sort = %query.sort,
        "Query complete"
    );

    #[allow(clippy::print_stdout)]
    {
        for product in products {
            println!("{}", product_line(product));
        }
    }
    Ok(())
}

/// Counts by stock, badge and family.
fn summary(catalog: &Catalog) -> String {
    let products = catalog.products();
    let in_stock = products.iter().filter(|p| p.in_stock).count();

    let mut out = format!(
        "{} products, {} in stock, {} out of stock, {} featured\n",
        products.len(),
        in_stock,
        products.len() - in_stock,
        catalog.featured().len()
    );

    for family in FragranceFamily::ALL {
        let count = products.iter().filter(|p| p.has_family(family)).count();
        if count > 0 {
            let _ = writeln!(out, "  {:<10} {count}", family.as_str());
        }
    }
    out
}

/// One result row: slug, name, cheapest price, sizes, stock.
fn product_line(product: &Product) -> String {
    let sizes: Vec<&str> = product.sizes.iter().map(|s| s.size.as_str()).collect();
    format!(
        "{:<24} {:<24} {:>10}  {:<18} {}",
        product.slug,
        product.name,
        product.min_price().to_string(),
        sizes.join(","),
        if product.in_stock { "in stock" } else { "out of stock" }
    )
}
