//! Upload queue store implementations for Courier.
//!
//! Provides the durable JSON-file store used in production and an
//! in-memory store with the same staged/commit contract for tests and
//! throwaway deployments.

pub mod json;
pub mod memory;

pub use json::JsonFileStore;
pub use memory::MemoryStore;
