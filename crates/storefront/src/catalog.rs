//! Demo product catalog.
//!
//! Products are loaded once at startup from `{content_dir}/products.json`
//! and rendered on the home page as add-to-cart triggers. A missing or
//! malformed catalog logs a warning and yields an empty catalog; the cart
//! itself does not depend on it.

use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

/// A product offered on the home page.
#[derive(Debug, Clone, Deserialize)]
pub struct Product {
    pub id: String,
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Error)]
enum CatalogError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed products.json: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Catalog of demo products held in memory.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Arc<Vec<Product>>,
}

impl Catalog {
    /// Load the catalog from the content directory.
    #[must_use]
    pub fn load(content_dir: &Path) -> Self {
        let path = content_dir.join("products.json");
        if !path.exists() {
            tracing::warn!("Catalog file does not exist: {:?}", path);
            return Self::default();
        }
        match Self::try_load(&path) {
            Ok(products) => {
                tracing::info!("Loaded {} products", products.len());
                Self {
                    products: Arc::new(products),
                }
            }
            Err(e) => {
                tracing::error!("Failed to load catalog {:?}: {e}", path);
                Self::default()
            }
        }
    }

    fn try_load(path: &Path) -> Result<Vec<Product>, CatalogError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }
}
