mod error;
mod mount;
#[cfg(test)]
mod tests;

pub use error::ConfigError;
pub use mount::{DEFAULT_INDEX, MountConfig, MountOptions, MountSpec, TokenSpec};

use std::collections::HashSet;
use std::path::Path;

use http::HeaderName;
use serde::Deserialize;

fn default_listen() -> String {
    "0.0.0.0:3000".to_string()
}

/// Top-level server configuration file.
#[derive(Debug, Deserialize)]
pub struct StaticfsConfig {
    /// e.g. "0.0.0.0:3000"
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default, rename = "mount")]
    pub mounts: Vec<MountSpec>,
}

impl StaticfsConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let cfg = Self::parse(&text).map_err(|e| ConfigError::parse(path, e))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Structural checks. Mount roots must exist when this runs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mounts.is_empty() {
            return Err(ConfigError::NoMounts);
        }

        let mut seen = HashSet::new();
        for mount in &self.mounts {
            let prefix = &mount.options.url_prefix;

            if !prefix.is_empty() && !prefix.starts_with('/') {
                return Err(ConfigError::InvalidPrefix {
                    prefix: prefix.clone(),
                });
            }

            if !seen.insert(prefix.as_str()) {
                return Err(ConfigError::DuplicateMount {
                    prefix: prefix.clone(),
                });
            }

            if !mount.root.is_dir() {
                return Err(ConfigError::MissingRoot {
                    prefix: prefix.clone(),
                    root: mount.root.clone(),
                });
            }

            if let Some(token) = &mount.auth_token {
                if HeaderName::from_bytes(token.header.as_bytes()).is_err() {
                    return Err(ConfigError::InvalidAuthHeader {
                        prefix: prefix.clone(),
                        header: token.header.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}
