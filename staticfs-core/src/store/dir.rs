use std::path::PathBuf;

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use tokio::fs;
use tokio::io::AsyncReadExt;

use crate::store::{Metadata, Store, StoreError, StoreFile, base_name};

/// A store rooted at a local directory.
///
/// Keys are joined onto the root as-is. Like the rest of the server, no
/// traversal filtering happens here; mount a directory you are happy to expose.
#[derive(Debug, Clone)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let rel = key.trim_start_matches('/');
        if rel.is_empty() {
            self.root.clone()
        } else {
            self.root.join(rel)
        }
    }
}

#[async_trait]
impl Store for DirStore {
    async fn open(&self, key: &str) -> Result<Box<dyn StoreFile>, StoreError> {
        let path = self.path_for(key);

        let std_meta = fs::metadata(&path)
            .await
            .map_err(|e| StoreError::io(key, e))?;

        let metadata = Metadata {
            name: base_name(key).to_string(),
            size: if std_meta.is_dir() { 0 } else { std_meta.len() },
            modified: std_meta.modified().ok(),
            is_dir: std_meta.is_dir(),
        };

        if metadata.is_dir {
            return Ok(Box::new(DirFile {
                key: key.to_string(),
                path,
                metadata,
                file: None,
            }));
        }

        let file = fs::File::open(&path)
            .await
            .map_err(|e| StoreError::io(key, e))?;

        Ok(Box::new(DirFile {
            key: key.to_string(),
            path,
            metadata,
            file: Some(file),
        }))
    }
}

struct DirFile {
    key: String,
    path: PathBuf,
    metadata: Metadata,
    file: Option<fs::File>,
}

#[async_trait]
impl StoreFile for DirFile {
    async fn metadata(&self) -> Result<Metadata, StoreError> {
        Ok(self.metadata.clone())
    }

    async fn read_dir(&mut self) -> Result<Vec<Metadata>, StoreError> {
        if !self.metadata.is_dir {
            return Err(StoreError::NotADirectory {
                key: self.key.clone(),
            });
        }

        let mut rd = fs::read_dir(&self.path)
            .await
            .map_err(|e| StoreError::io(&self.key, e))?;

        let mut children = Vec::new();
        while let Some(entry) = rd
            .next_entry()
            .await
            .map_err(|e| StoreError::io(&self.key, e))?
        {
            let meta = entry
                .metadata()
                .await
                .map_err(|e| StoreError::io(&self.key, e))?;

            children.push(Metadata {
                name: entry.file_name().to_string_lossy().into_owned(),
                size: if meta.is_dir() { 0 } else { meta.len() },
                modified: meta.modified().ok(),
                is_dir: meta.is_dir(),
            });
        }

        Ok(children)
    }

    async fn read_chunk(&mut self, max: usize) -> Result<Option<Bytes>, StoreError> {
        let Some(file) = self.file.as_mut() else {
            return Ok(None);
        };

        let mut buf = BytesMut::zeroed(max);
        let n = file
            .read(&mut buf[..])
            .await
            .map_err(|e| StoreError::io(&self.key, e))?;

        if n == 0 {
            return Ok(None);
        }

        buf.truncate(n);
        Ok(Some(buf.freeze()))
    }

    async fn close(&mut self) -> Result<(), StoreError> {
        // tokio closes the descriptor on drop; there is nothing left to flush
        // for a read-only handle.
        self.file.take();
        Ok(())
    }
}
