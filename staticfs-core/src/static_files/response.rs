use std::fmt;

use bytes::Bytes;
use http::{HeaderMap, HeaderValue, StatusCode, header};
use thiserror::Error;

use crate::store::{StoreError, StoreFile};

pub enum StaticBody {
    Empty,
    /// Generated content and short error messages.
    Bytes(Bytes),
    /// A file streamed from the store. `len` matches the declared
    /// Content-Length.
    Stream { file: Box<dyn StoreFile>, len: u64 },
}

impl fmt::Debug for StaticBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("Empty"),
            Self::Bytes(b) => f.debug_tuple("Bytes").field(&b.len()).finish(),
            Self::Stream { len, .. } => f.debug_struct("Stream").field("len", len).finish(),
        }
    }
}

#[derive(Debug)]
pub struct StaticResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: StaticBody,
}

impl StaticResponse {
    /// A bodyless response with `Content-Length: 0`.
    pub fn empty(status: StatusCode) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from_static("0"));

        Self {
            status,
            headers,
            body: StaticBody::Empty,
        }
    }

    pub fn text(status: StatusCode, body: impl Into<String>) -> Self {
        let body = Bytes::from(body.into());
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from(body.len()));

        Self {
            status,
            headers,
            body: StaticBody::Bytes(body),
        }
    }

    /// Body bytes for `Empty` and `Bytes` bodies. Streams are not drained.
    pub fn body_bytes(&self) -> Option<&Bytes> {
        match &self.body {
            StaticBody::Bytes(b) => Some(b),
            _ => None,
        }
    }
}

/// The result of offering a request to the file server.
#[derive(Debug)]
pub enum Outcome {
    /// The server produced the final response.
    Handled(StaticResponse),

    /// The request is not ours. The host continues with its own chain.
    Pass,
}

impl Outcome {
    pub fn into_response(self) -> Option<StaticResponse> {
        match self {
            Self::Handled(resp) => Some(resp),
            Self::Pass => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ServeError {
    #[error("cannot open file or directory {key}")]
    NotFound { key: String },

    #[error("directory browsing is disabled for {key}")]
    Forbidden { key: String },

    #[error("failed to open {key}: {source}")]
    Open {
        key: String,
        #[source]
        source: StoreError,
    },

    #[error("failed to stat {key}: {source}")]
    Stat {
        key: String,
        #[source]
        source: StoreError,
    },

    #[error("request denied by pre-handler")]
    Unauthorized,

    #[error("failed to read dir: {source}")]
    Render {
        #[source]
        source: StoreError,
    },

    #[error("failed to close {key}: {source}")]
    Close {
        key: String,
        #[source]
        source: StoreError,
    },
}

impl ServeError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Open { .. } | Self::Stat { .. } | Self::Render { .. } | Self::Close { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// The terminal response for this failure, with a short message body.
    pub fn into_response(self) -> StaticResponse {
        let status = self.status();
        match self {
            Self::NotFound { .. } => StaticResponse::text(status, "Cannot open file or Directory"),
            Self::Open { .. } => StaticResponse::text(status, "failed to open"),
            Self::Stat { .. } => StaticResponse::text(status, "failed to stat"),
            Self::Render { .. } => StaticResponse::text(status, self.to_string()),
            Self::Close { .. } => StaticResponse::text(status, "fail to close file"),
            Self::Forbidden { .. } | Self::Unauthorized => StaticResponse::empty(status),
        }
    }
}
