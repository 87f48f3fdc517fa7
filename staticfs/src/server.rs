use std::sync::Arc;

use anyhow::{Context, Result};
use http::HeaderName;
use pingora::prelude::*;
use pingora::server::Server;
use staticfs_core::config::{MountSpec, StaticfsConfig};
use staticfs_core::store::DirStore;
use staticfs_core::{FileServer, FileServerBuilder, HeaderTokenGate};

use crate::gateway::StaticfsGateway;

/// Run the Pingora server with the given configuration.
pub fn run(config: StaticfsConfig) -> Result<()> {
    let server = build_pingora_server(&config)?;

    tracing::info!(listen = %config.listen, mounts = config.mounts.len(), "staticfs starting");
    server.run_forever();
}

/// Build the Pingora server.
pub fn build_pingora_server(config: &StaticfsConfig) -> Result<Server> {
    // "None" tells Pingora to use its default settings.
    let mut server = Server::new(None)?;
    server.bootstrap();

    let mounts = config
        .mounts
        .iter()
        .map(build_mount)
        .collect::<Result<Vec<_>>>()?;

    let gateway = StaticfsGateway::new(mounts);

    let mut svc = http_proxy_service(&server.configuration, gateway);
    svc.add_tcp(&config.listen);

    server.add_service(svc);
    Ok(server)
}

/// One file server per mount, backed by the mount's local directory.
fn build_mount(spec: &MountSpec) -> Result<FileServer> {
    let store = Arc::new(DirStore::new(spec.root.clone()));
    let mut builder = FileServerBuilder::from_options(spec.options.clone(), store);

    if let Some(token) = &spec.auth_token {
        let header = HeaderName::from_bytes(token.header.as_bytes())
            .with_context(|| format!("invalid auth header '{}'", token.header))?;
        builder = builder.pre_handler(HeaderTokenGate::new(header, token.value.clone()));
    }

    tracing::debug!(
        prefix = %spec.options.url_prefix,
        root = %spec.root.display(),
        browse = spec.options.browse,
        "mount configured"
    );

    Ok(builder.build())
}
