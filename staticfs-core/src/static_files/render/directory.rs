use std::time::SystemTime;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use http::{HeaderMap, HeaderValue, StatusCode, header};

use crate::static_files::fallback::ResolvedEntry;
use crate::static_files::resolve::trim_trailing_slashes;
use crate::static_files::{ServeError, StaticBody, StaticResponse};
use crate::store::Metadata;

/// One row of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ListingEntry<'a> {
    pub name: &'a str,
    pub is_dir: bool,
    pub size: u64,
    pub modified: Option<SystemTime>,
}

impl<'a> From<&'a Metadata> for ListingEntry<'a> {
    fn from(m: &'a Metadata) -> Self {
        Self {
            name: &m.name,
            is_dir: m.is_dir,
            size: m.size,
            modified: m.modified,
        }
    }
}

/// Enumerates a directory entry and renders its HTML listing.
///
/// The handle is closed once the children are read. Nothing is returned
/// until the whole document exists, so an enumeration failure never leaves a
/// half-written page behind.
pub(crate) async fn render_directory(
    entry: ResolvedEntry,
    request_path: &str,
) -> Result<StaticResponse, ServeError> {
    let ResolvedEntry { key, mut file, .. } = entry;

    let children = file
        .read_dir()
        .await
        .map_err(|source| ServeError::Render { source })?;

    if let Err(err) = file.close().await {
        tracing::warn!(key = %key, "failed to close directory handle: {err}");
    }

    let html = render_listing(request_path, &children);
    let body = Bytes::from(html);

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/html"));
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(body.len()));

    Ok(StaticResponse {
        status: StatusCode::OK,
        headers,
        body: StaticBody::Bytes(body),
    })
}

/// Render a basic HTML directory listing.
///
/// Entries are sorted byte-wise by name regardless of store order. Every
/// name, link and the request path are HTML-escaped.
pub(crate) fn render_listing(request_path: &str, children: &[Metadata]) -> String {
    let mut entries: Vec<ListingEntry<'_>> = children.iter().map(ListingEntry::from).collect();
    entries.sort_by(|a, b| a.name.as_bytes().cmp(b.name.as_bytes()));

    let base_escaped = escape_html(request_path);

    let mut html = String::with_capacity(512 + entries.len() * 128);

    html.push_str("<html><head><title>");
    html.push_str(&base_escaped);
    html.push_str("</title><style>.dir { font-weight: bold }</style></head><body>");

    html.push_str("<h1>");
    html.push_str(&base_escaped);
    html.push_str("</h1>");

    html.push_str("<ul>");

    // Parent link (unless at root)
    if base_escaped.len() > 1 {
        let parent = format!("{}/..", trim_trailing_slashes(request_path));
        html.push_str("<li><a href=\"");
        html.push_str(&escape_html(&parent));
        html.push_str("\" class=\"dir\">..</a></li>");
    }

    for entry in entries {
        let (class, aux) = if entry.is_dir {
            ("dir", "dir".to_string())
        } else {
            ("file", format!("file, {} bytes", entry.size))
        };

        html.push_str("<li><a href=\"");
        html.push_str(&escape_html(&join_href(request_path, entry.name)));
        html.push_str("\" class=\"");
        html.push_str(class);
        html.push_str("\">");
        html.push_str(&escape_html(entry.name));
        html.push_str("</a>, ");
        html.push_str(&aux);
        html.push_str(", last modified ");
        html.push_str(&format_modified(entry.modified));
        html.push_str("</li>");
    }

    html.push_str("</ul></body></html>");

    html
}

/// `base` and `name` joined by exactly one `/`.
fn join_href(base: &str, name: &str) -> String {
    let base = trim_trailing_slashes(base);
    format!("{base}/{name}")
}

fn format_modified(modified: Option<SystemTime>) -> String {
    match modified {
        Some(t) => DateTime::<Utc>::from(t)
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string(),
        None => "unknown".to_string(),
    }
}

/// Minimal HTML escaping (sufficient for filenames)
pub(crate) fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}
