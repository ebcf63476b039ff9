//! Read-only product catalog.
//!
//! The catalog is loaded once at startup, either from the built-in demo data
//! or from a JSON file, and validated before the server accepts traffic.
//!
//! # File Format
//!
//! ```json
//! {
//!   "categories": [{ "id": 1, "name": "Электроника" }],
//!   "products": [
//!     { "id": 1, "name": "Смартфон", "price": { "amount": "50000", "currency_code": "RUB" }, "category_id": 1 }
//!   ]
//! }
//! ```

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use pocket_shop_core::{Category, CategoryId, CurrencyCode, Price, Product, ProductId};

/// Errors raised while loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("duplicate category id {0}")]
    DuplicateCategory(CategoryId),

    #[error("duplicate product id {0}")]
    DuplicateProduct(ProductId),

    #[error("product {product} references unknown category {category}")]
    UnknownCategory {
        product: ProductId,
        category: CategoryId,
    },
}

/// Lookup of a product ID that is not in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("product {0} not found")]
pub struct ProductNotFound(pub ProductId);

/// On-disk catalog document.
#[derive(Debug, Deserialize)]
struct CatalogDocument {
    categories: Vec<Category>,
    products: Vec<Product>,
}

/// Static set of categories and products.
///
/// Every product's `category_id` names a category in the same catalog, and
/// IDs are unique within each list. Both lists keep their load order.
#[derive(Debug, Clone)]
pub struct Catalog {
    categories: Vec<Category>,
    products: Vec<Product>,
    by_id: HashMap<ProductId, usize>,
}

impl Catalog {
    /// Build a catalog, checking referential integrity.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` on duplicate IDs or a product whose category is
    /// missing.
    pub fn from_parts(
        categories: Vec<Category>,
        products: Vec<Product>,
    ) -> Result<Self, CatalogError> {
        let mut category_ids = HashSet::with_capacity(categories.len());
        for category in &categories {
            if !category_ids.insert(category.id) {
                return Err(CatalogError::DuplicateCategory(category.id));
            }
        }

        let mut by_id = HashMap::with_capacity(products.len());
        for (position, product) in products.iter().enumerate() {
            if !category_ids.contains(&product.category_id) {
                return Err(CatalogError::UnknownCategory {
                    product: product.id,
                    category: product.category_id,
                });
            }
            if by_id.insert(product.id, position).is_some() {
                return Err(CatalogError::DuplicateProduct(product.id));
            }
        }

        Ok(Self {
            categories,
            products,
            by_id,
        })
    }

    /// Load and validate a catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Io` or `CatalogError::Parse` if the file cannot
    /// be read or decoded, and any validation error from [`Self::from_parts`].
    pub fn from_json_file(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let document: CatalogDocument =
            serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        Self::from_parts(document.categories, document.products)
    }

    /// The built-in demo catalog: two categories, three products.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the built-in data fails validation.
    pub fn seeded() -> Result<Self, CatalogError> {
        let electronics = CategoryId::new(1);
        let books = CategoryId::new(2);

        let categories = vec![
            Category {
                id: electronics,
                name: "Электроника".to_string(),
            },
            Category {
                id: books,
                name: "Книги".to_string(),
            },
        ];

        let products = vec![
            Product {
                id: ProductId::new(1),
                name: "Смартфон".to_string(),
                price: Price::whole(50_000, CurrencyCode::RUB),
                category_id: electronics,
            },
            Product {
                id: ProductId::new(2),
                name: "Ноутбук".to_string(),
                price: Price::whole(120_000, CurrencyCode::RUB),
                category_id: electronics,
            },
            Product {
                id: ProductId::new(3),
                name: "FastAPI для профи".to_string(),
                price: Price::whole(2_990, CurrencyCode::RUB),
                category_id: books,
            },
        ];

        Self::from_parts(categories, products)
    }

    /// All categories, in load order.
    #[must_use]
    pub fn list_categories(&self) -> &[Category] {
        &self.categories
    }

    /// Products, optionally restricted to one category.
    ///
    /// A filter of `None` or category `0` returns every product. A filter that
    /// matches nothing returns an empty list.
    #[must_use]
    pub fn list_products(&self, category_id: Option<CategoryId>) -> Vec<&Product> {
        match category_id.filter(|id| id.as_i32() != 0) {
            Some(category_id) => self
                .products
                .iter()
                .filter(|p| p.category_id == category_id)
                .collect(),
            None => self.products.iter().collect(),
        }
    }

    /// Look up a single product.
    ///
    /// # Errors
    ///
    /// Returns `ProductNotFound` if no product has this ID.
    pub fn get_product(&self, id: ProductId) -> Result<&Product, ProductNotFound> {
        self.by_id
            .get(&id)
            .and_then(|&position| self.products.get(position))
            .ok_or(ProductNotFound(id))
    }

    /// Whether a product with this ID exists.
    #[must_use]
    pub fn contains_product(&self, id: ProductId) -> bool {
        self.by_id.contains_key(&id)
    }
}
