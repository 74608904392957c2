//! Application state for the coverage engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::{ConfigLoader, EngineSettings};
use crate::store::MemoryStore;

/// Shared application state.
///
/// Holds the engine settings and the record store. Handlers take a read
/// lock to snapshot records and compute without holding it.
#[derive(Clone)]
pub struct AppState {
    settings: Arc<EngineSettings>,
    store: Arc<RwLock<MemoryStore>>,
}

impl AppState {
    /// Creates the state from loaded configuration, seeding the store.
    pub fn new(config: ConfigLoader) -> Self {
        let store = MemoryStore::from_config(&config);
        Self::with_store(config.settings().clone(), store)
    }

    /// Creates the state from explicit settings and store.
    pub fn with_store(settings: EngineSettings, store: MemoryStore) -> Self {
        Self {
            settings: Arc::new(settings),
            store: Arc::new(RwLock::new(store)),
        }
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Returns the shared record store.
    pub fn store(&self) -> &RwLock<MemoryStore> {
        &self.store
    }
}
