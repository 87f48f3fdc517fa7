pub mod gateway;
pub mod server;

pub use server::{build_pingora_server, run};
