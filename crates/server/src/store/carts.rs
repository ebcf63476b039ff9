//! Per-account carts.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use thiserror::Error;

use pocket_shop_core::{Cart, ProductId, Quantity, Username};

use crate::services::catalog::Catalog;

/// Errors that can occur while mutating a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CartError {
    #[error("product {0} not found")]
    ProductNotFound(ProductId),
}

/// Carts keyed by owning account.
///
/// The outer map lock is only held long enough to find or create an entry;
/// each cart has its own mutex, so writers for different accounts never
/// contend. A cart is created lazily on its first successful add.
pub struct CartStore {
    catalog: Arc<Catalog>,
    carts: RwLock<HashMap<Username, Arc<Mutex<Cart>>>>,
}

impl CartStore {
    #[must_use]
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            carts: RwLock::new(HashMap::new()),
        }
    }

    /// Snapshot of an account's cart. Accounts without a cart get an empty one.
    #[must_use]
    pub fn get(&self, owner: &Username) -> Cart {
        self.slot(owner)
            .map(|cart| cart.lock().clone())
            .unwrap_or_default()
    }

    /// Add units of a product to an account's cart.
    ///
    /// The product is checked against the catalog before the cart is touched,
    /// so a failed add leaves no trace. Returns the cart as it stands right
    /// after this add.
    ///
    /// # Errors
    ///
    /// Returns `CartError::ProductNotFound` if the catalog has no such product.
    pub fn add(
        &self,
        owner: &Username,
        product_id: ProductId,
        quantity: Quantity,
    ) -> Result<Cart, CartError> {
        if !self.catalog.contains_product(product_id) {
            return Err(CartError::ProductNotFound(product_id));
        }

        let slot = self.slot_or_create(owner);
        let mut cart = slot.lock();
        let line = cart.add(product_id, quantity);

        tracing::debug!(owner = %owner, product_id = %product_id, line, "Cart line updated");
        Ok(cart.clone())
    }

    /// Empty an account's cart. Clearing a missing or empty cart is a no-op.
    pub fn clear(&self, owner: &Username) {
        if let Some(slot) = self.slot(owner) {
            slot.lock().clear();
        }
    }

    /// Number of accounts that have ever held a cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.carts.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.carts.read().is_empty()
    }

    fn slot(&self, owner: &Username) -> Option<Arc<Mutex<Cart>>> {
        self.carts.read().get(owner).map(Arc::clone)
    }

    fn slot_or_create(&self, owner: &Username) -> Arc<Mutex<Cart>> {
        if let Some(slot) = self.slot(owner) {
            return slot;
        }

        let mut carts = self.carts.write();
        Arc::clone(carts.entry(owner.clone()).or_default())
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("carts", &self.len())
            .finish_non_exhaustive()
    }
}
