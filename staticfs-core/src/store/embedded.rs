use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::time::{Duration, SystemTime};

use async_trait::async_trait;
use bytes::Bytes;
use rust_embed::RustEmbed;

use crate::store::{Metadata, Store, StoreError, StoreFile, base_name};

/// A store over assets compiled into the binary with `#[derive(RustEmbed)]`.
///
/// ```ignore
/// #[derive(rust_embed::RustEmbed)]
/// #[folder = "public/"]
/// struct Assets;
///
/// let store = EmbeddedStore::<Assets>::new();
/// ```
pub struct EmbeddedStore<E: RustEmbed> {
    _assets: PhantomData<fn() -> E>,
}

impl<E: RustEmbed> EmbeddedStore<E> {
    pub fn new() -> Self {
        Self {
            _assets: PhantomData,
        }
    }

    fn children(dir: &str) -> Option<Vec<Metadata>> {
        let prefix = if dir.is_empty() {
            String::new()
        } else {
            format!("{dir}/")
        };

        let mut found = false;
        let mut children: BTreeMap<String, Metadata> = BTreeMap::new();

        for path in E::iter() {
            let Some(rest) = path.strip_prefix(prefix.as_str()) else {
                continue;
            };
            found = true;

            match rest.split_once('/') {
                Some((sub, _)) => {
                    children
                        .entry(sub.to_string())
                        .or_insert_with(|| Metadata::dir(sub, None));
                }
                None => {
                    if let Some(asset) = E::get(&path) {
                        children.insert(
                            rest.to_string(),
                            Metadata::file(
                                rest,
                                asset.data.len() as u64,
                                last_modified(asset.metadata.last_modified()),
                            ),
                        );
                    }
                }
            }
        }

        found.then(|| children.into_values().collect())
    }
}

impl<E: RustEmbed> Default for EmbeddedStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: RustEmbed + Send + Sync> Store for EmbeddedStore<E> {
    async fn open(&self, key: &str) -> Result<Box<dyn StoreFile>, StoreError> {
        let rel = key.trim_start_matches('/').trim_end_matches('/');

        if !rel.is_empty() {
            if let Some(asset) = E::get(rel) {
                let data = Bytes::from(asset.data.into_owned());
                let modified = last_modified(asset.metadata.last_modified());
                return Ok(Box::new(EmbeddedFile {
                    metadata: Metadata::file(base_name(key), data.len() as u64, modified),
                    data,
                    children: None,
                }));
            }
        }

        match Self::children(rel) {
            Some(children) => Ok(Box::new(EmbeddedFile {
                metadata: Metadata::dir(base_name(key), None),
                data: Bytes::new(),
                children: Some(children),
            })),
            None => Err(StoreError::not_found(key)),
        }
    }
}

fn last_modified(secs: Option<u64>) -> Option<SystemTime> {
    secs.map(|s| SystemTime::UNIX_EPOCH + Duration::from_secs(s))
}

struct EmbeddedFile {
    metadata: Metadata,
    data: Bytes,
    children: Option<Vec<Metadata>>,
}

#[async_trait]
impl StoreFile for EmbeddedFile {
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
        if self.data.is_empty() {
            return Ok(None);
        }
        let n = max.min(self.data.len());
        Ok(Some(self.data.split_to(n)))
    }

    async fn close(&mut self) -> Result<(), StoreError> {
        self.data.clear();
        Ok(())
    }
}
