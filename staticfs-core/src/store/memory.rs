use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::time::SystemTime;

use async_trait::async_trait;
use bytes::Bytes;

use crate::store::{Metadata, Store, StoreError, StoreFile, base_name};

#[derive(Debug, Clone)]
struct MemoryEntry {
    data: Bytes,
    modified: Option<SystemTime>,
}

/// An immutable in-memory bundle of files.
///
/// Directories are implied by the files below them; empty directories can be
/// declared with [`MemoryStore::with_dir`]. Keys are `/`-rooted, e.g.
/// `/img/logo.png`.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    files: Arc<BTreeMap<String, MemoryEntry>>,
    dirs: Arc<BTreeSet<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, key: &str, data: impl Into<Bytes>) -> Self {
        self.with_file_modified(key, data, None)
    }

    pub fn with_file_modified(
        mut self,
        key: &str,
        data: impl Into<Bytes>,
        modified: Option<SystemTime>,
    ) -> Self {
        let key = normalize_key(key);
        let mut dirs = (*self.dirs).clone();
        for parent in parents(&key) {
            dirs.insert(parent);
        }
        let mut files = (*self.files).clone();
        files.insert(
            key,
            MemoryEntry {
                data: data.into(),
                modified,
            },
        );
        self.files = Arc::new(files);
        self.dirs = Arc::new(dirs);
        self
    }

    pub fn with_dir(mut self, key: &str) -> Self {
        let key = normalize_key(key);
        let mut dirs = (*self.dirs).clone();
        for parent in parents(&key) {
            dirs.insert(parent);
        }
        dirs.insert(key);
        self.dirs = Arc::new(dirs);
        self
    }

    fn is_dir(&self, key: &str) -> bool {
        key == "/" || self.dirs.contains(key)
    }

    fn children(&self, dir: &str) -> Vec<Metadata> {
        let prefix = if dir == "/" {
            "/".to_string()
        } else {
            format!("{dir}/")
        };

        let files = self
            .files
            .iter()
            .filter_map(|(key, entry)| {
                let rest = key.strip_prefix(&prefix)?;
                (!rest.contains('/'))
                    .then(|| Metadata::file(rest, entry.data.len() as u64, entry.modified))
            });

        let dirs = self.dirs.iter().filter_map(|key| {
            let rest = key.strip_prefix(&prefix)?;
            (!rest.is_empty() && !rest.contains('/')).then(|| Metadata::dir(rest, None))
        });

        // Reverse name order. Consumers sort for themselves.
        let mut all: Vec<Metadata> = files.chain(dirs).collect();
        all.reverse();
        all
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn open(&self, key: &str) -> Result<Box<dyn StoreFile>, StoreError> {
        let key = normalize_key(key);

        if let Some(entry) = self.files.get(&key) {
            return Ok(Box::new(MemoryFile {
                metadata: Metadata::file(
                    base_name(&key),
                    entry.data.len() as u64,
                    entry.modified,
                ),
                data: entry.data.clone(),
                children: None,
                closed: false,
            }));
        }

        if self.is_dir(&key) {
            return Ok(Box::new(MemoryFile {
                metadata: Metadata::dir(base_name(&key), None),
                data: Bytes::new(),
                children: Some(self.children(&key)),
                closed: false,
            }));
        }

        Err(StoreError::not_found(key))
    }
}

struct MemoryFile {
    metadata: Metadata,
    data: Bytes,
    children: Option<Vec<Metadata>>,
    closed: bool,
}

#[async_trait]
impl StoreFile for MemoryFile {
    async fn metadata(&self) -> Result<Metadata, StoreError> {
        Ok(self.metadata.clone())
    }

    async fn read_dir(&mut self) -> Result<Vec<Metadata>, StoreError> {
        self.children
            .clone()
            .ok_or_else(|| StoreError::NotADirectory {
                key: self.metadata.name.clone(),
            })
    }

    async fn read_chunk(&mut self, max: usize) -> Result<Option<Bytes>, StoreError> {
        if self.closed || self.data.is_empty() {
            return Ok(None);
        }
        let n = max.min(self.data.len());
        Ok(Some(self.data.split_to(n)))
    }

    async fn close(&mut self) -> Result<(), StoreError> {
        self.closed = true;
        Ok(())
    }
}

/// `/`-roots a key and drops trailing slashes, except for the root itself.
fn normalize_key(key: &str) -> String {
    let trimmed = key.trim_end_matches('/');
    if trimmed.is_empty() {
        return "/".to_string();
    }
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

/// Every ancestor directory of `key`, excluding the root.
fn parents(key: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = key;
    while let Some((parent, _)) = current.rsplit_once('/') {
        if parent.is_empty() {
            break;
        }
        out.push(parent.to_string());
        current = parent;
    }
    out
}
