use std::path::PathBuf;

use serde::Deserialize;

pub const DEFAULT_INDEX: &str = "index.html";

/// Options for one mount, as written by an integrator or read from a file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MountOptions {
    /// The router mount path, stripped literally from request paths.
    pub url_prefix: String,
    /// Prepended to every lookup key after the mount path is stripped.
    pub path_prefix: String,
    /// Render an HTML listing for directories without an index file.
    pub browse: bool,
    pub index: String,
    /// Cache-Control max-age in seconds. Zero or negative sends no header.
    pub max_age: i64,
    /// Served instead of a missing key, e.g. a single-page app's entry point.
    pub not_found_file: Option<String>,
}

impl Default for MountOptions {
    fn default() -> Self {
        Self {
            url_prefix: String::new(),
            path_prefix: String::new(),
            browse: false,
            index: DEFAULT_INDEX.to_string(),
            max_age: 0,
            not_found_file: None,
        }
    }
}

/// A header/token pair required by the built-in token gate.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenSpec {
    pub header: String,
    pub value: String,
}

/// A mount entry in the server config file.
#[derive(Debug, Clone, Deserialize)]
pub struct MountSpec {
    #[serde(flatten)]
    pub options: MountOptions,
    /// Local directory backing the mount.
    pub root: PathBuf,
    pub auth_token: Option<TokenSpec>,
}

/// Normalized, read-only mount configuration.
///
/// Built once from [`MountOptions`]; the index, not-found and path-prefix
/// names are `/`-rooted here and nowhere else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountConfig {
    url_prefix: String,
    path_prefix: String,
    browse: bool,
    index: String,
    max_age: i64,
    not_found_file: Option<String>,
    cache_control: Option<String>,
}

impl MountConfig {
    pub fn url_prefix(&self) -> &str {
        &self.url_prefix
    }

    pub fn path_prefix(&self) -> &str {
        &self.path_prefix
    }

    pub fn browse(&self) -> bool {
        self.browse
    }

    pub fn index(&self) -> &str {
        &self.index
    }

    pub fn max_age(&self) -> i64 {
        self.max_age
    }

    pub fn not_found_file(&self) -> Option<&str> {
        self.not_found_file.as_deref()
    }

    /// `public, max-age=<n>`, or `None` when caching is off.
    pub fn cache_control(&self) -> Option<&str> {
        self.cache_control.as_deref()
    }
}

impl From<MountOptions> for MountConfig {
    fn from(opts: MountOptions) -> Self {
        let index = if opts.index.is_empty() {
            DEFAULT_INDEX.to_string()
        } else {
            opts.index
        };

        let cache_control = (opts.max_age > 0).then(|| format!("public, max-age={}", opts.max_age));

        Self {
            url_prefix: opts.url_prefix,
            path_prefix: root_non_empty(opts.path_prefix),
            browse: opts.browse,
            index: ensure_leading_slash(index),
            max_age: opts.max_age,
            not_found_file: opts
                .not_found_file
                .filter(|f| !f.is_empty())
                .map(ensure_leading_slash),
            cache_control,
        }
    }
}

fn ensure_leading_slash(s: String) -> String {
    if s.starts_with('/') {
        s
    } else {
        format!("/{s}")
    }
}

fn root_non_empty(s: String) -> String {
    if s.is_empty() {
        s
    } else {
        ensure_leading_slash(s)
    }
}
