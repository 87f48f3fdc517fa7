use std::time::SystemTime;

use http::{HeaderMap, HeaderName, HeaderValue, header};
use httpdate::fmt_http_date;

#[derive(Debug, Default)]
pub(crate) struct HeaderBuilder {
    headers: HeaderMap,
}

impl HeaderBuilder {
    /// Inserts (or removes) a header from the header map.
    ///
    /// Converts the provided string value into a `HeaderValue`. If the conversion fails
    /// or results in an empty value, the header is removed from the map.
    pub(crate) fn insert(&mut self, header_name: HeaderName, value: &str) {
        let header_value = HeaderValue::from_str(value).unwrap_or(HeaderValue::from_static(""));
        if header_value.is_empty() {
            self.headers.remove(header_name);
        } else {
            self.headers.insert(header_name, header_value);
        }
    }

    pub(crate) fn content_type(&mut self, value: &str) {
        self.insert(header::CONTENT_TYPE, value);
    }

    pub(crate) fn content_length(&mut self, len: u64) {
        self.headers.insert(header::CONTENT_LENGTH, HeaderValue::from(len));
    }

    /// Sets `Last-Modified` when the store reports a modification time.
    pub(crate) fn last_modified(&mut self, modified: Option<SystemTime>) {
        if let Some(t) = modified {
            self.insert(header::LAST_MODIFIED, &fmt_http_date(t));
        }
    }

    pub(crate) fn cache_control(&mut self, value: Option<&str>) {
        if let Some(value) = value {
            self.insert(header::CACHE_CONTROL, value);
        }
    }

    pub(crate) fn build(self) -> HeaderMap {
        self.headers
    }
}
