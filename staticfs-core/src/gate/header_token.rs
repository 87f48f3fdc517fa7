use http::{HeaderName, StatusCode};

use crate::gate::{AuthGate, GateDecision};
use crate::static_files::{StaticRequest, StaticResponse};

const DENY_BODY: &str = "Authorize Fail!";

/// Allows requests carrying a fixed token in a named header.
#[derive(Debug, Clone)]
pub struct HeaderTokenGate {
    header: HeaderName,
    token: String,
}

impl HeaderTokenGate {
    pub fn new(header: HeaderName, token: impl Into<String>) -> Self {
        Self {
            header,
            token: token.into(),
        }
    }
}

impl AuthGate for HeaderTokenGate {
    fn check(&self, req: &StaticRequest) -> GateDecision {
        let presented = req
            .headers
            .get(&self.header)
            .and_then(|v| v.to_str().ok());

        if presented == Some(self.token.as_str()) {
            return GateDecision::Allow;
        }

        tracing::debug!(header = %self.header, path = %req.path, "token gate denied request");
        GateDecision::deny_with(StaticResponse::text(StatusCode::UNAUTHORIZED, DENY_BODY))
    }
}
