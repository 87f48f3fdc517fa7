use crate::config::MountConfig;
use crate::static_files::StaticRequest;

/// Maps a request onto a store lookup key.
///
/// This is literal string surgery. Percent-encoding, `.`/`..` segments and
/// case are passed through untouched; stores see exactly what the client sent
/// below the mount point.
pub fn resolve_lookup_key(req: &StaticRequest, config: &MountConfig) -> String {
    let remainder = match req.route_param.as_deref() {
        Some(filepath) => filepath,
        None => req
            .path
            .strip_prefix(config.url_prefix())
            .unwrap_or(&req.path),
    };

    let mut key = String::with_capacity(config.path_prefix().len() + remainder.len() + 1);
    key.push_str(config.path_prefix());
    if !remainder.starts_with('/') {
        key.push('/');
    }
    key.push_str(remainder);

    if key.len() > 1 {
        key.truncate(trim_trailing_slashes(&key).len());
    }

    key
}

pub(crate) fn trim_trailing_slashes(s: &str) -> &str {
    s.trim_end_matches('/')
}
