use async_trait::async_trait;
use bytes::Bytes;
use http::{HeaderMap, StatusCode};
use pingora::prelude::*;
use pingora_http::ResponseHeader;
use staticfs_core::{
    DeliverError, FileServer, Outcome, ResponseSink, StaticRequest, deliver,
};

/// Routes each request to the first mount whose prefix matches.
///
/// Everything is answered in `request_filter`; there is no upstream.
pub struct StaticfsGateway {
    mounts: Vec<FileServer>,
}

impl StaticfsGateway {
    pub fn new(mounts: Vec<FileServer>) -> Self {
        Self { mounts }
    }

    fn mount_for(&self, path: &str) -> Option<&FileServer> {
        self.mounts.iter().find(|m| m.matches(path))
    }
}

#[async_trait]
impl ProxyHttp for StaticfsGateway {
    type CTX = ();

    fn new_ctx(&self) -> Self::CTX {}

    async fn upstream_peer(
        &self,
        _session: &mut Session,
        _ctx: &mut Self::CTX,
    ) -> Result<Box<HttpPeer>> {
        Err(Error::new(Custom("staticfs has no upstream")))
    }

    /// ACCEPT → MATCH MOUNT → SERVE
    async fn request_filter(&self, session: &mut Session, _ctx: &mut Self::CTX) -> Result<bool> {
        let req_header = session.req_header();
        let mut req = StaticRequest::new(req_header.method.clone(), req_header.uri.path());
        req.headers = req_header.headers.clone();

        let Some(mount) = self.mount_for(&req.path) else {
            tracing::debug!(path = %req.path, "no mount matched");
            session.respond_error(404).await?;
            return Ok(true);
        };

        let resp = match mount.handle(&mut req).await {
            Outcome::Handled(resp) => resp,
            Outcome::Pass => {
                tracing::debug!(method = %req.method, path = %req.path, "request passed by mount");
                session.respond_error(404).await?;
                return Ok(true);
            }
        };

        let status = resp.status;
        let mut sink = SessionSink { session };
        if let Err(err) = deliver(resp, &mut sink).await {
            tracing::error!(path = %req.path, status = status.as_u16(), "failed to deliver response: {err}");
            return Err(Error::new(Custom("static response delivery failed")));
        }

        Ok(true)
    }
}

/// Writes a static response through a Pingora downstream session.
struct SessionSink<'a> {
    session: &'a mut Session,
}

#[async_trait]
impl ResponseSink for SessionSink<'_> {
    async fn write_head(
        &mut self,
        status: StatusCode,
        headers: &HeaderMap,
    ) -> Result<(), DeliverError> {
        let mut resp = ResponseHeader::build(status, Some(headers.len()))
            .map_err(|e| DeliverError::Sink(e.to_string()))?;

        for (name, value) in headers.iter() {
            resp.insert_header(name, value)
                .map_err(|e| DeliverError::Sink(e.to_string()))?;
        }

        // Headers only; the body (or its end) follows.
        self.session
            .write_response_header(Box::new(resp), false)
            .await
            .map_err(|e| DeliverError::Sink(e.to_string()))
    }

    async fn write_body(
        &mut self,
        chunk: Option<Bytes>,
        end_of_stream: bool,
    ) -> Result<(), DeliverError> {
        self.session
            .write_response_body(chunk, end_of_stream)
            .await
            .map_err(|e| DeliverError::Sink(e.to_string()))
    }
}
