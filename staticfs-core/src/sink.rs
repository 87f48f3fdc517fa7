//! Writing a [`StaticResponse`] out through the host.

use async_trait::async_trait;
use bytes::Bytes;
use http::{HeaderMap, StatusCode};
use thiserror::Error;

use crate::static_files::{StaticBody, StaticResponse};
use crate::store::StoreError;

const CHUNK_SIZE: usize = 32 * 1024;

#[derive(Debug, Error)]
pub enum DeliverError {
    #[error("response sink failed: {0}")]
    Sink(String),

    #[error("failed to read response body: {0}")]
    Read(#[source] StoreError),

    #[error("body ended {remaining} bytes short of its declared length")]
    Truncated { remaining: u64 },

    #[error("failed to close response body: {0}")]
    Close(#[source] StoreError),
}

/// The host's response writer: status and headers once, then body chunks.
#[async_trait]
pub trait ResponseSink: Send {
    async fn write_head(
        &mut self,
        status: StatusCode,
        headers: &HeaderMap,
    ) -> Result<(), DeliverError>;

    async fn write_body(
        &mut self,
        chunk: Option<Bytes>,
        end_of_stream: bool,
    ) -> Result<(), DeliverError>;
}

/// Writes `response` to `sink`, streaming file bodies chunk by chunk.
///
/// The file handle is closed once its last byte is written. On a read error
/// mid-stream the body is abandoned where it stands and the error returned;
/// the host should drop the connection rather than finish the response.
pub async fn deliver<S>(response: StaticResponse, sink: &mut S) -> Result<(), DeliverError>
where
    S: ResponseSink + ?Sized,
{
    sink.write_head(response.status, &response.headers).await?;

    match response.body {
        StaticBody::Empty => sink.write_body(None, true).await,

        StaticBody::Bytes(bytes) => sink.write_body(Some(bytes), true).await,

        StaticBody::Stream { mut file, len } => {
            let mut remaining = len;

            while remaining > 0 {
                let to_read = std::cmp::min(CHUNK_SIZE as u64, remaining) as usize;

                let chunk = match file.read_chunk(to_read).await.map_err(DeliverError::Read)? {
                    Some(chunk) => chunk,
                    None => return Err(DeliverError::Truncated { remaining }),
                };

                remaining = remaining.saturating_sub(chunk.len() as u64);
                sink.write_body(Some(chunk), false).await?;
            }

            file.close().await.map_err(DeliverError::Close)?;

            // End-of-stream.
            sink.write_body(None, true).await
        }
    }
}
