pub mod config;
pub mod gate;
pub mod logging;
pub mod sink;
pub mod static_files;
pub mod store;

pub use gate::{AuthGate, GateDecision, HeaderTokenGate};
pub use sink::{DeliverError, ResponseSink, deliver};
pub use static_files::{
    FileServer, FileServerBuilder, Outcome, ServeError, StaticBody, StaticRequest, StaticResponse,
};
pub use store::{Metadata, Store, StoreError, StoreFile};
