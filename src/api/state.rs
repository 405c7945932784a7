//! Application state for the payroll engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::ConfigLoader;
use crate::error::{EngineError, EngineResult};
use crate::history::HistoryStore;

/// Shared application state.
///
/// Holds the validated tax configuration, read-only for the life of the
/// process, and the calculation history.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    history: Arc<RwLock<HistoryStore>>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(config: ConfigLoader, history: HistoryStore) -> Self {
        Self {
            config: Arc::new(config),
            history: Arc::new(RwLock::new(history)),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the shared history store.
    pub fn history(&self) -> &RwLock<HistoryStore> {
        &self.history
    }

    /// Applies a change to the history under the write lock.
    ///
    /// File-backed stores run the change on the blocking pool, since it
    /// writes the history file before returning.
    pub async fn update_history<T, F>(&self, update: F) -> EngineResult<T>
    where
        F: FnOnce(&mut HistoryStore) -> EngineResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let mut history = Arc::clone(&self.history).write_owned().await;
        if !history.is_file_backed() {
            return update(&mut history);
        }

        let location = history.location();
        tokio::task::spawn_blocking(move || update(&mut history))
            .await
            .map_err(|e| EngineError::HistoryStorage {
                path: location,
                message: e.to_string(),
            })?
    }
}
