use std::sync::Arc;

use http::Method;

use crate::config::{MountConfig, MountOptions};
use crate::gate::{AuthGate, GateDecision};
use crate::static_files::fallback::{Resolution, resolve_entry};
use crate::static_files::render::{render_directory, render_file};
use crate::static_files::{Outcome, ServeError, StaticRequest, resolve_lookup_key};
use crate::store::Store;

/// Serves a store below a URL prefix.
///
/// One instance per mount, shared read-only across requests:
///
/// ```ignore
/// let server = FileServer::builder("/dir", MemoryStore::new())
///     .browse(true)
///     .max_age(3600)
///     .build();
///
/// match server.handle(&mut req).await {
///     Outcome::Handled(resp) => deliver(resp, &mut sink).await?,
///     Outcome::Pass => next(req).await,
/// }
/// ```
pub struct FileServer {
    config: MountConfig,
    store: Arc<dyn Store>,
    gate: Option<Arc<dyn AuthGate>>,
}

impl FileServer {
    pub fn builder(url_prefix: impl Into<String>, store: impl Store + 'static) -> FileServerBuilder {
        FileServerBuilder::new(url_prefix, Arc::new(store))
    }

    pub fn new(
        config: MountConfig,
        store: Arc<dyn Store>,
        gate: Option<Arc<dyn AuthGate>>,
    ) -> Self {
        Self {
            config,
            store,
            gate,
        }
    }

    /// Route patterns for hosts that mount by wildcard route. The remainder
    /// must be passed back as [`StaticRequest::route_param`].
    pub fn routes(&self) -> [(Method, String); 2] {
        let pattern = format!("{}/*filepath", self.config.url_prefix().trim_end_matches('/'));
        [(Method::GET, pattern.clone()), (Method::HEAD, pattern)]
    }

    /// Whether a prefix-mounted server owns `path`.
    pub fn matches(&self, path: &str) -> bool {
        path.starts_with(self.config.url_prefix())
    }

    /// Handles one request.
    ///
    /// Only GET and HEAD are served; anything else is handed back as
    /// [`Outcome::Pass`] without touching the gate or the store.
    pub async fn handle(&self, req: &mut StaticRequest) -> Outcome {
        if req.method != Method::GET && req.method != Method::HEAD {
            return Outcome::Pass;
        }

        if let Some(gate) = &self.gate {
            if let GateDecision::Deny(custom) = gate.check(req) {
                tracing::info!(method = %req.method, path = %req.path, "request denied by pre-handler");
                let resp = custom.unwrap_or_else(|| ServeError::Unauthorized.into_response());
                return Outcome::Handled(resp);
            }
        }

        let key = resolve_lookup_key(req, &self.config);

        match self.serve(&key, req).await {
            Ok(outcome) => outcome,
            Err(err) => {
                if err.status().is_server_error() {
                    tracing::error!(path = %req.path, key = %key, status = err.status().as_u16(), "{err}");
                } else {
                    tracing::warn!(path = %req.path, key = %key, status = err.status().as_u16(), "{err}");
                }
                Outcome::Handled(err.into_response())
            }
        }
    }

    async fn serve(&self, key: &str, req: &mut StaticRequest) -> Result<Outcome, ServeError> {
        match resolve_entry(self.store.as_ref(), key, &self.config).await? {
            Resolution::File(entry) => {
                tracing::debug!(
                    key = %entry.key,
                    substitute = entry.is_substitute,
                    size = entry.metadata.size,
                    "serving file"
                );
                render_file(entry, req, &self.config).await
            }
            Resolution::Listing(entry) => {
                tracing::debug!(key = %entry.key, "rendering directory listing");
                render_directory(entry, &req.path)
                    .await
                    .map(Outcome::Handled)
            }
        }
    }
}

/// Integrator-facing options for a [`FileServer`].
pub struct FileServerBuilder {
    options: MountOptions,
    store: Arc<dyn Store>,
    gate: Option<Arc<dyn AuthGate>>,
}

impl FileServerBuilder {
    pub fn new(url_prefix: impl Into<String>, store: Arc<dyn Store>) -> Self {
        Self {
            options: MountOptions {
                url_prefix: url_prefix.into(),
                ..MountOptions::default()
            },
            store,
            gate: None,
        }
    }

    /// Start from existing options, e.g. a mount read from a config file.
    pub fn from_options(options: MountOptions, store: Arc<dyn Store>) -> Self {
        Self {
            options,
            store,
            gate: None,
        }
    }

    /// A prefix added to every lookup key, e.g. `img` to serve `/img/*` at
    /// the mount root.
    pub fn path_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.options.path_prefix = prefix.into();
        self
    }

    pub fn browse(mut self, enabled: bool) -> Self {
        self.options.browse = enabled;
        self
    }

    /// Index file for serving a directory. Defaults to `index.html`.
    pub fn index(mut self, name: impl Into<String>) -> Self {
        self.options.index = name.into();
        self
    }

    /// Cache-Control max-age in seconds for GET responses.
    pub fn max_age(mut self, seconds: i64) -> Self {
        self.options.max_age = seconds;
        self
    }

    /// File served when the requested key does not exist. Useful for SPAs.
    pub fn not_found_file(mut self, path: impl Into<String>) -> Self {
        self.options.not_found_file = Some(path.into());
        self
    }

    /// A gate run before any store access.
    pub fn pre_handler(mut self, gate: impl AuthGate + 'static) -> Self {
        self.gate = Some(Arc::new(gate));
        self
    }

    pub fn build(self) -> FileServer {
        FileServer::new(MountConfig::from(self.options), self.store, self.gate)
    }
}
