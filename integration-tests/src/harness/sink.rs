use async_trait::async_trait;
use bytes::Bytes;
use http::{HeaderMap, StatusCode};
use staticfs_core::{DeliverError, ResponseSink};

/// One call made on a [`RecordingSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkWrite {
    Head(StatusCode),
    Body { len: usize, end_of_stream: bool },
}

/// Captures everything written to it, optionally failing after a number of
/// body writes.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub status: Option<StatusCode>,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
    pub writes: Vec<SinkWrite>,
    fail_after: Option<usize>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every body write after the first `n`.
    pub fn failing_after(n: usize) -> Self {
        Self {
            fail_after: Some(n),
            ..Self::default()
        }
    }

    pub fn body_writes(&self) -> Vec<usize> {
        self.writes
            .iter()
            .filter_map(|w| match w {
                SinkWrite::Body { len, .. } => Some(*len),
                SinkWrite::Head(_) => None,
            })
            .collect()
    }

    pub fn ended(&self) -> bool {
        matches!(
            self.writes.last(),
            Some(SinkWrite::Body {
                end_of_stream: true,
                ..
            })
        )
    }
}

#[async_trait]
impl ResponseSink for RecordingSink {
    async fn write_head(
        &mut self,
        status: StatusCode,
        headers: &HeaderMap,
    ) -> Result<(), DeliverError> {
        self.status = Some(status);
        self.headers = headers.clone();
        self.writes.push(SinkWrite::Head(status));
        Ok(())
    }

    async fn write_body(
        &mut self,
        chunk: Option<Bytes>,
        end_of_stream: bool,
    ) -> Result<(), DeliverError> {
        if let Some(limit) = self.fail_after {
            if self.body_writes().len() >= limit {
                return Err(DeliverError::Sink("connection reset".to_string()));
            }
        }

        let len = chunk.as_ref().map_or(0, Bytes::len);
        if let Some(chunk) = chunk {
            self.body.extend_from_slice(&chunk);
        }
        self.writes.push(SinkWrite::Body { len, end_of_stream });
        Ok(())
    }
}
