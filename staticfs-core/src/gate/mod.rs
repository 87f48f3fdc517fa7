mod header_token;

pub use header_token::HeaderTokenGate;

use crate::static_files::{StaticRequest, StaticResponse};

/// Outcome of the pre-resolution authorization check.
#[derive(Debug)]
pub enum GateDecision {
    /// Continue to path resolution.
    Allow,

    /// Stop the pipeline. A supplied response is sent verbatim, otherwise the
    /// server answers `401 Unauthorized`.
    Deny(Option<StaticResponse>),
}

impl GateDecision {
    pub fn deny() -> Self {
        Self::Deny(None)
    }

    pub fn deny_with(response: StaticResponse) -> Self {
        Self::Deny(Some(response))
    }

    pub fn is_allow(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// A pre-handler run before any store access.
///
/// The gate sees the request exactly as the host handed it over. It runs for
/// GET and HEAD only; other methods never reach it.
pub trait AuthGate: Send + Sync {
    fn check(&self, req: &StaticRequest) -> GateDecision;
}

impl<F> AuthGate for F
where
    F: Fn(&StaticRequest) -> GateDecision + Send + Sync,
{
    fn check(&self, req: &StaticRequest) -> GateDecision {
        self(req)
    }
}
