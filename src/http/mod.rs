//! HTTP protocol layer module
//!
//! Response builders shared by the request handler.

pub mod response;

pub use response::{build_403_response, build_404_response, build_ok_response};
