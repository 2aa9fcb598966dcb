//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use isha_core::{Catalog, Handoff};

use crate::carts::CartStore;
use crate::config::StorefrontConfig;
use crate::middleware::session::SESSION_EXPIRY_SECONDS;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The catalog is read once at
/// startup and never changes while the server runs. Carts are the only
/// mutable state and sit behind the [`CartStore`] lock.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    handoff: Handoff,
    carts: CartStore,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Storefront configuration
    /// * `catalog` - Validated product catalog
    #[must_use]
    pub fn new(config: StorefrontConfig, catalog: Catalog) -> Self {
        let handoff = Handoff::new(
            config.checkout.brand_name.clone(),
            config.checkout.whatsapp_number.clone(),
        );

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                handoff,
                carts: CartStore::new(Duration::from_secs(SESSION_EXPIRY_SECONDS.unsigned_abs())),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get the WhatsApp order formatter.
    #[must_use]
    pub fn handoff(&self) -> &Handoff {
        &self.inner.handoff
    }

    /// Get the per-visitor cart store.
    #[must_use]
    pub fn carts(&self) -> &CartStore {
        &self.inner.carts
    }
}
