//! Routing module
//!
//! Fixed-priority path matching: root greeting, subscription payload,
//! handshake check, then not found.

mod matcher;

pub use matcher::{match_route, Route};
