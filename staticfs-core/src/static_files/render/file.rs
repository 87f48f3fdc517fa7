use http::{Method, StatusCode};

use crate::config::MountConfig;
use crate::static_files::fallback::ResolvedEntry;
use crate::static_files::render::headers::HeaderBuilder;
use crate::static_files::{Outcome, ServeError, StaticBody, StaticRequest, StaticResponse};

/// Shapes the response for a resolved, non-directory entry.
///
/// GET streams the file. HEAD reports the length, sends nothing, and closes
/// the handle before returning; a failed close is a server error. Anything
/// else falls through to the host.
pub(crate) async fn render_file(
    entry: ResolvedEntry,
    req: &mut StaticRequest,
    config: &MountConfig,
) -> Result<Outcome, ServeError> {
    let ResolvedEntry {
        key,
        mut file,
        metadata,
        ..
    } = entry;

    let mut headers = HeaderBuilder::default();
    headers.content_type(content_type_for(&metadata.name));
    headers.last_modified(metadata.modified);

    if req.method == Method::GET {
        headers.cache_control(config.cache_control());
        headers.content_length(metadata.size);

        return Ok(Outcome::Handled(StaticResponse {
            status: StatusCode::OK,
            headers: headers.build(),
            body: StaticBody::Stream {
                file,
                len: metadata.size,
            },
        }));
    }

    if req.method == Method::HEAD {
        req.discard_body();
        headers.content_length(metadata.size);

        file.close()
            .await
            .map_err(|source| ServeError::Close { key, source })?;

        return Ok(Outcome::Handled(StaticResponse {
            status: StatusCode::OK,
            headers: headers.build(),
            body: StaticBody::Empty,
        }));
    }

    Ok(Outcome::Pass)
}

/// MIME type for the extension after the last `.` in `name`.
pub(crate) fn content_type_for(name: &str) -> &'static str {
    let ext = match name.rfind('.') {
        Some(i) => &name[i + 1..],
        None => "",
    };

    mime_guess::from_ext(ext)
        .first_raw()
        .unwrap_or("application/octet-stream")
}
