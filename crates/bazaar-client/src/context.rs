//! # App Context
//!
//! Bundles the store, the backend services and the configuration so the UI
//! shell can hand one value to every command.

use crate::services::Services;
use crate::state::{CartStore, ClientConfig};

/// Everything a command needs.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub store: CartStore,
    pub services: Services,
    pub config: ClientConfig,
}

impl AppContext {
    /// Creates a context with a fresh, signed-out store sized from `config`.
    pub fn new(services: Services, config: ClientConfig) -> Self {
        AppContext {
            store: CartStore::new(config.max_cart_items),
            services,
            config,
        }
    }
}
