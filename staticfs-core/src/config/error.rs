use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    // IO
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Parsing
    #[error("failed to parse TOML in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    // Validation
    #[error("no mounts defined")]
    NoMounts,

    #[error("duplicate mount for prefix {prefix}")]
    DuplicateMount { prefix: String },

    #[error("mount prefix '{prefix}' must start with '/'")]
    InvalidPrefix { prefix: String },

    #[error("mount '{prefix}' root {root} is not a directory")]
    MissingRoot { prefix: String, root: PathBuf },

    #[error("mount '{prefix}' has an invalid auth header name '{header}'")]
    InvalidAuthHeader { prefix: String, header: String },
}

impl ConfigError {
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFile {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, source: toml::de::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }
}
