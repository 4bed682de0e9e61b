//! Application state shared across handlers.

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::config::StorefrontConfig;
use crate::services::CartService;
use crate::store::JsonFileStore;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; holds the configuration, the cart
/// service, and the demo catalog.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    cart: CartService,
    catalog: Catalog,
}

impl AppState {
    /// Create the application state: a file-backed cart store rooted at
    /// the configured data directory and a catalog loaded from the
    /// configured content directory.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let cart = CartService::new(Arc::new(JsonFileStore::new(&config.data_dir)));
        let catalog = Catalog::load(&config.content_dir);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                cart,
                catalog,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the cart service.
    #[must_use]
    pub fn cart(&self) -> &CartService {
        &self.inner.cart
    }

    /// Get a reference to the demo catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }
}
