//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::ReturnsConfig;
use crate::shopify::{AdminClient, AdminError};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; holds the configuration and the Admin API
/// client, both constructed once at process start.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ReturnsConfig,
    admin: AdminClient,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the Admin API client cannot be constructed.
    pub fn new(config: ReturnsConfig) -> Result<Self, AdminError> {
        let admin = AdminClient::new(&config.shopify)?;

        Ok(Self {
            inner: Arc::new(AppStateInner { config, admin }),
        })
    }

    /// Get a reference to the configuration.
    #[must_use]
    pub fn config(&self) -> &ReturnsConfig {
        &self.inner.config
    }

    /// Get a reference to the Shopify Admin API client.
    #[must_use]
    pub fn admin(&self) -> &AdminClient {
        &self.inner.admin
    }
}
