//! Order link commands.

use std::path::Path;

use isha_core::{Handoff, OrderLink, Product};
use isha_storefront::catalog::load_catalog;
use isha_storefront::config::StorefrontConfig;
use tracing::info;

/// Print the quick order message and link for one product.
///
/// Brand name and WhatsApp number come from the storefront configuration.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded, the product is unknown
/// or out of stock, or the size is not offered.
pub fn product(
    path: &Path,
    slug: &str,
    size: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    let handoff = Handoff::new(config.checkout.brand_name, config.checkout.whatsapp_number);

    let catalog = load_catalog(path)?;
    let product = catalog
        .by_slug(slug)
        .ok_or_else(|| format!("No product with slug {slug}"))?;

    let order = quick_order(&handoff, product, size)?;
    info!(product_id = %product.id, "Quick order link created");

    #[allow(clippy::print_stdout)]
    {
        println!("{}\n\n{}", order.message, order.url);
    }
    Ok(())
}

fn quick_order(handoff: &Handoff, product: &Product, size: Option<&str>) -> Result<OrderLink, String> {
    if !product.in_stock {
        return Err(format!("{} is out of stock", product.name));
    }

    let variant = match size {
        Some(label) => product
            .size(label)
            .ok_or_else(|| format!("{} has no size {label}", product.name))?,
        None => product
            .default_size()
            .ok_or_else(|| format!("{} has no sizes", product.name))?,
    };

    Ok(handoff.product_order(&product.name, &variant.size, variant.price))
}
