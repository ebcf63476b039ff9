//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::services::catalog::{Catalog, CatalogError};
use crate::services::tokens::TokenIssuer;
use crate::store::{CartStore, CredentialError, CredentialStore};

/// Error building application state at startup.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("credential store error: {0}")]
    Credentials(#[from] CredentialError),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and gives access to the
/// in-memory stores, the catalog, and the token issuer.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    credentials: CredentialStore,
    tokens: TokenIssuer,
    catalog: Arc<Catalog>,
    carts: CartStore,
}

impl AppState {
    /// Create application state from configuration.
    ///
    /// Loads the catalog file when one is configured, otherwise the built-in
    /// demo catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog fails to load or validate.
    pub fn new(config: &ServerConfig) -> Result<Self, StateError> {
        let catalog = match &config.catalog_path {
            Some(path) => {
                let catalog = Catalog::from_json_file(path)?;
                tracing::info!(path = %path.display(), "Catalog loaded from file");
                catalog
            }
            None => {
                tracing::info!("Using built-in demo catalog");
                Catalog::seeded()?
            }
        };

        Self::with_parts(TokenIssuer::new(&config.tokens), catalog)
    }

    /// Create application state from already-built parts.
    ///
    /// # Errors
    ///
    /// Returns an error if the credential store cannot be initialized.
    pub fn with_parts(tokens: TokenIssuer, catalog: Catalog) -> Result<Self, StateError> {
        let catalog = Arc::new(catalog);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                credentials: CredentialStore::new()?,
                tokens,
                carts: CartStore::new(Arc::clone(&catalog)),
                catalog,
            }),
        })
    }

    /// Get a reference to the credential store.
    #[must_use]
    pub fn credentials(&self) -> &CredentialStore {
        &self.inner.credentials
    }

    /// Get a reference to the token issuer.
    #[must_use]
    pub fn tokens(&self) -> &TokenIssuer {
        &self.inner.tokens
    }

    /// Get a reference to the catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the cart store.
    #[must_use]
    pub fn carts(&self) -> &CartStore {
        &self.inner.carts
    }
}
