//! Localization resources supplied by the host application.
//!
//! The rate provider only consumes this seam; a real deployment wires in the
//! host's own resource store. [`MemoryLocaleStore`] backs the CLI and tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

#[async_trait]
pub trait LocalizationService: Send + Sync {
    async fn add_or_update_resource(&self, key: &str, text: &str);
    async fn delete_resource(&self, key: &str);
    async fn get_resource(&self, key: &str) -> Option<String>;
}

/// In-memory resource store using HashMap behind a Mutex.
pub struct MemoryLocaleStore {
    inner: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryLocaleStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl Default for MemoryLocaleStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LocalizationService for MemoryLocaleStore {
    async fn add_or_update_resource(&self, key: &str, text: &str) {
        let mut resources = self.inner.lock().await;
        debug!("Locale PUT for key: {key}");
        resources.insert(key.to_string(), text.to_string());
    }

    async fn delete_resource(&self, key: &str) {
        let mut resources = self.inner.lock().await;
        debug!("Locale DELETE for key: {key}");
        resources.remove(key);
    }

    async fn get_resource(&self, key: &str) -> Option<String> {
        let resources = self.inner.lock().await;
        resources.get(key).cloned()
    }
}
