use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue, Method};

/// The slice of an inbound request the file server needs.
///
/// Hosts build this from their own request type. `route_param` carries the
/// wildcard remainder when the server is mounted as a `{prefix}/*filepath`
/// route; prefix-mounted servers leave it empty and the path is stripped
/// instead.
#[derive(Debug, Clone)]
pub struct StaticRequest {
    pub method: Method,
    pub path: String,
    pub route_param: Option<String>,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl StaticRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            route_param: None,
            headers: HeaderMap::new(),
            body: Bytes::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn head(path: impl Into<String>) -> Self {
        Self::new(Method::HEAD, path)
    }

    pub fn with_route_param(mut self, filepath: impl Into<String>) -> Self {
        self.route_param = Some(filepath.into());
        self
    }

    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub(crate) fn discard_body(&mut self) {
        self.body = Bytes::new();
    }
}
