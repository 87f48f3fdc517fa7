use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use staticfs_core::{Store, StoreError, StoreFile};

/// Records every key opened through it, then delegates.
#[derive(Clone)]
pub struct RecordingStore {
    inner: Arc<dyn Store>,
    opened: Arc<Mutex<Vec<String>>>,
}

impl RecordingStore {
    pub fn new(inner: impl Store + 'static) -> Self {
        Self {
            inner: Arc::new(inner),
            opened: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Keys opened so far, in call order.
    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }

    pub fn open_count(&self) -> usize {
        self.opened.lock().unwrap().len()
    }
}

#[async_trait]
impl Store for RecordingStore {
    async fn open(&self, key: &str) -> Result<Box<dyn StoreFile>, StoreError> {
        self.opened.lock().unwrap().push(key.to_string());
        self.inner.open(key).await
    }
}
