#[cfg(feature = "embedded_store")]
mod embedded_store_tests;
mod memory_store_tests;
