//! Request handler module
//!
//! Turns a matched route into a response: greeting, subscription payload,
//! handshake check or not found.

pub mod router;

// Re-export main entry point
pub use router::handle_request;
