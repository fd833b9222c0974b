//! Business logic handlers
//!
//! These handlers contain the core business logic that sits between
//! the HTTP API and the store.

pub mod memory;

// Re-export commonly used types
pub use memory::*;
