//! Catalog file validation.
//!
//! # Usage
//!
//! ```bash
//! shop-cli catalog check ./catalog.json
//! ```
//!
//! Runs the same loading and validation the server performs for
//! `SHOP_CATALOG_PATH`.

use std::path::Path;

use pocket_shop_server::services::catalog::{Catalog, CatalogError};

/// Counts reported for a valid catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogSummary {
    pub categories: usize,
    pub products: usize,
}

/// Load and validate a catalog file.
///
/// # Errors
///
/// Returns `CatalogError` if the file cannot be read, parsed, or fails
/// validation.
pub fn check(path: &Path) -> Result<CatalogSummary, CatalogError> {
    let catalog = Catalog::from_json_file(path)?;

    Ok(CatalogSummary {
        categories: catalog.list_categories().len(),
        products: catalog.list_products(None).len(),
    })
}
