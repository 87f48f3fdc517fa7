pub mod server;
pub mod sink;
pub mod store;
pub mod tracing;

pub use server::TestServer;
pub use sink::{RecordingSink, SinkWrite};
pub use store::RecordingStore;
pub use self::tracing::{CapturedEvent, events, init_test_tracing};
