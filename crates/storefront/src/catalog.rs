//! Catalog loading.
//!
//! The product list lives in a JSON file next to the storefront crate
//! (`data/products.json`). It is read once at startup; a bad file stops the
//! server from starting rather than serving a partial catalog.

use std::path::{Path, PathBuf};

use isha_core::{Catalog, CatalogError};
use thiserror::Error;

/// Errors that can occur while loading the catalog file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid catalog {path}: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: CatalogError,
    },
}

/// Read and validate the catalog at `path`.
///
/// # Errors
///
/// Returns `LoadError::Io` if the file cannot be read and
/// `LoadError::Invalid` if it is not a valid catalog.
pub fn load_catalog(path: &Path) -> Result<Catalog, LoadError> {
    let json = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let catalog = Catalog::from_json(&json).map_err(|source| LoadError::Invalid {
        path: path.to_path_buf(),
        source,
    })?;

    if catalog.is_empty() {
        tracing::warn!("Catalog {:?} has no products", path);
    } else {
        tracing::info!(products = catalog.len(), "Loaded catalog from {:?}", path);
    }

    Ok(catalog)
}
