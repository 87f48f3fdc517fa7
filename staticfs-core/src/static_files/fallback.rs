use crate::config::MountConfig;
use crate::static_files::ServeError;
use crate::static_files::resolve::trim_trailing_slashes;
use crate::store::{Metadata, Store, StoreError, StoreFile};

/// The file selected to answer a request, owned by that request.
pub(crate) struct ResolvedEntry {
    /// The key that was actually opened.
    pub key: String,
    pub file: Box<dyn StoreFile>,
    pub metadata: Metadata,
    /// Set when the file stands in for the requested key: the not-found
    /// substitute or a directory's index.
    pub is_substitute: bool,
}

pub(crate) enum Resolution {
    File(ResolvedEntry),
    /// A directory with no usable index, and browsing is on.
    Listing(ResolvedEntry),
}

/// Opens `key`, applying the not-found substitute and index-file fallbacks.
///
/// Order:
/// 1. Open the key; on "not found" try the substitute file once.
/// 2. Stat whatever opened.
/// 3. For a directory, swap in `<dir><index>` when it opens and stats.
/// 4. A remaining directory is listed when browsing is on, else forbidden.
pub(crate) async fn resolve_entry(
    store: &dyn Store,
    key: &str,
    config: &MountConfig,
) -> Result<Resolution, ServeError> {
    let mut opened_key = key.to_string();
    let mut is_substitute = false;

    let mut result = store.open(key).await;

    let missing = matches!(&result, Err(err) if err.is_not_found());
    if let (true, Some(substitute)) = (missing, config.not_found_file()) {
        tracing::debug!(key, substitute, "serving not-found substitute");
        opened_key = substitute.to_string();
        is_substitute = true;
        result = store.open(substitute).await;
    }

    let file = match result {
        Ok(file) => file,
        Err(StoreError::NotFound { .. }) => {
            return Err(ServeError::NotFound {
                key: key.to_string(),
            });
        }
        Err(source) => {
            return Err(ServeError::Open {
                key: opened_key,
                source,
            });
        }
    };

    let metadata = file.metadata().await.map_err(|source| ServeError::Stat {
        key: opened_key.clone(),
        source,
    })?;

    let mut entry = ResolvedEntry {
        key: opened_key,
        file,
        metadata,
        is_substitute,
    };

    if entry.metadata.is_dir {
        let index_key = format!("{}{}", trim_trailing_slashes(key), config.index());
        if let Some(index) = open_index(store, index_key).await {
            entry = index;
        }
    }

    if entry.metadata.is_dir {
        if config.browse() {
            return Ok(Resolution::Listing(entry));
        }
        return Err(ServeError::Forbidden {
            key: key.to_string(),
        });
    }

    Ok(Resolution::File(entry))
}

/// The index entry, only if both open and stat succeed. The handle and its
/// metadata always travel together.
async fn open_index(store: &dyn Store, index_key: String) -> Option<ResolvedEntry> {
    let file = match store.open(&index_key).await {
        Ok(file) => file,
        Err(err) => {
            tracing::debug!(key = %index_key, "no index file: {err}");
            return None;
        }
    };

    match file.metadata().await {
        Ok(metadata) => Some(ResolvedEntry {
            key: index_key,
            file,
            metadata,
            is_substitute: true,
        }),
        Err(err) => {
            tracing::warn!(key = %index_key, "index file could not be stat'ed: {err}");
            None
        }
    }
}
