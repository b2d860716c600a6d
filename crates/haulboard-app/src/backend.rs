//! Process-wide backend handle
//!
//! `init` builds the backend from an explicit `Config`; everything else
//! reaches it through `current` until `teardown` drops it.

use std::sync::{Arc, Mutex, MutexGuard};

use haulboard_domain::model::Record;
use haulboard_domain::repository::RecordStore;
use haulboard_types::{ConfigError, Result};
use tracing::{debug, info};

use crate::auth::{AuthProvider, LocalAuth};
use crate::config::Config;
use crate::repository::{open_record_stores, RecordStores, StoreFor};

static BACKEND: Mutex<Option<Arc<Backend>>> = Mutex::new(None);

/// Record stores and collaborators shared by every view
pub struct Backend {
    config: Config,
    stores: RecordStores,
    auth: Arc<dyn AuthProvider>,
}

impl std::fmt::Debug for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Backend")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Backend {
    /// Build a backend from config; the API key is read from the
    /// environment variable the config names, if set
    pub fn from_config(config: Config) -> Self {
        let stores = open_record_stores(&config);
        let secret = config.api_key().ok();
        if secret.is_none() {
            debug!(var = %config.api_key_env, "no API key in environment, sign-in disabled");
        }
        let auth = Arc::new(LocalAuth::new(config.accounts.clone(), secret));
        Self::with_parts(config, stores, auth)
    }

    pub fn with_parts(config: Config, stores: RecordStores, auth: Arc<dyn AuthProvider>) -> Self {
        Self {
            config,
            stores,
            auth,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn stores(&self) -> &RecordStores {
        &self.stores
    }

    pub fn auth(&self) -> &dyn AuthProvider {
        self.auth.as_ref()
    }

    /// Store for one record kind
    pub fn store<R: Record>(&self) -> Arc<dyn RecordStore<R>>
    where
        RecordStores: StoreFor<R>,
    {
        StoreFor::<R>::store(&self.stores)
    }
}

fn slot() -> MutexGuard<'static, Option<Arc<Backend>>> {
    BACKEND
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Initialize the process-wide backend, replacing any previous one
pub fn init(config: Config) -> Arc<Backend> {
    install(Backend::from_config(config))
}

/// Install an already-built backend
pub fn install(backend: Backend) -> Arc<Backend> {
    let backend = Arc::new(backend);
    let previous = slot().replace(Arc::clone(&backend));
    info!(replaced = previous.is_some(), "backend initialized");
    backend
}

/// The initialized backend
pub fn current() -> Result<Arc<Backend>> {
    slot()
        .as_ref()
        .map(Arc::clone)
        .ok_or_else(|| ConfigError::NotInitialized.into())
}

/// Drop the process-wide backend; handles already taken stay valid
pub fn teardown() {
    if slot().take().is_some() {
        info!("backend torn down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use haulboard_domain::model::Load;
    use haulboard_types::Error;

    // Single test so the shared slot is never raced by parallel tests.
    #[test]
    fn test_lifecycle() {
        teardown();
        assert!(matches!(
            current().unwrap_err(),
            Error::Config(ConfigError::NotInitialized)
        ));

        let first = init(Config::default());
        let held = current().unwrap();
        assert!(Arc::ptr_eq(&first, &held));
        assert_eq!(held.store::<Load>().fetch_records().unwrap().len(), 5);

        let second = init(Config {
            page_size: 3,
            ..Config::default()
        });
        assert_eq!(current().unwrap().config().page_size, 3);
        assert!(!Arc::ptr_eq(&first, &second));

        teardown();
        assert!(current().is_err());
        assert_eq!(held.config().page_size, 10);
        assert!(!held.auth().require_user());
    }
}
