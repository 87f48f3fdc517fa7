use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no such file or directory: {key}")]
    NotFound { key: String },

    #[error("not a directory: {key}")]
    NotADirectory { key: String },

    #[error("i/o error on {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound { key: key.into() }
    }

    /// Wraps an I/O error, keeping `ErrorKind::NotFound` distinguishable.
    pub fn io(key: impl Into<String>, source: std::io::Error) -> Self {
        let key = key.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound { key },
            _ => Self::Io { key, source },
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
