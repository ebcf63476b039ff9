//! Category and product route handlers.

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
};
use serde::Deserialize;
use tracing::instrument;

use pocket_shop_core::{Category, CategoryId, Product, ProductId};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Query parameters for product listing.
#[derive(Debug, Deserialize)]
pub struct ProductQuery {
    pub category_id: Option<CategoryId>,
}

/// List every category.
#[instrument(skip(state))]
pub async fn list_categories(State(state): State<AppState>) -> Json<Vec<Category>> {
    Json(state.catalog().list_categories().to_vec())
}

/// List products, optionally filtered by category.
#[instrument(skip(state, query))]
pub async fn list_products(
    State(state): State<AppState>,
    query: std::result::Result<Query<ProductQuery>, QueryRejection>,
) -> Result<Json<Vec<Product>>> {
    let Query(query) = query.map_err(|e| AppError::Unprocessable(e.body_text()))?;

    let products = state
        .catalog()
        .list_products(query.category_id)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(products))
}

/// Show a single product.
#[instrument(skip(state, id))]
pub async fn get_product(
    State(state): State<AppState>,
    id: std::result::Result<Path<ProductId>, PathRejection>,
) -> Result<Json<Product>> {
    let Path(id) = id.map_err(|e| AppError::Unprocessable(e.body_text()))?;
    let product = state.catalog().get_product(id)?;
    Ok(Json(product.clone()))
}
