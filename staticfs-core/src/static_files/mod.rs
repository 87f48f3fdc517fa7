mod fallback;
pub mod handler;
mod render;
mod request;
mod resolve;
mod response;

pub use handler::{FileServer, FileServerBuilder};
pub use request::StaticRequest;
pub use resolve::resolve_lookup_key;
pub use response::{Outcome, ServeError, StaticBody, StaticResponse};
