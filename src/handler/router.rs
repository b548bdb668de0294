//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: matches the path, builds the
//! response and writes the access log line.

use std::net::SocketAddr;
use std::time::Instant;

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Request, Response, Version};

use crate::config::AppState;
use crate::http;
use crate::identity::NodeId;
use crate::logger::{self, AccessLogEntry};
use crate::routing::{match_route, Route};

pub const GREETING: &str = "Hello from Rust VLESS!\n";
pub const HANDSHAKE_OK: &str = "VLESS handshake success\n";

/// Main entry point for HTTP request handling
///
/// Every method is treated alike; only the path takes part in routing.
pub fn handle_request<B>(
    req: &Request<B>,
    state: &AppState,
    peer_addr: SocketAddr,
) -> Response<Full<Bytes>> {
    let started = Instant::now();
    let response = dispatch(req.uri().path(), state);

    if state.config.logging.access_log {
        let mut entry = AccessLogEntry::new(
            peer_addr.to_string(),
            req.method().to_string(),
            req.uri().path().to_string(),
        );
        entry.query = req.uri().query().map(ToString::to_string);
        entry.http_version = version_label(req.version()).to_string();
        entry.status = response.status().as_u16();
        entry.body_bytes = response
            .body()
            .size_hint()
            .exact()
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or_default();
        entry.referer = header_value(req, "referer");
        entry.user_agent = header_value(req, "user-agent");
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    response
}

/// Route a path to its response
pub fn dispatch(path: &str, state: &AppState) -> Response<Full<Bytes>> {
    match match_route(path, state) {
        Route::Root => http::build_ok_response(GREETING),
        Route::Subscription => http::build_ok_response(state.subscription_payload.clone()),
        Route::Handshake(claimed) => verify_handshake(claimed, state),
        Route::NotFound => http::build_404_response(),
    }
}

/// Check a claimed identity against the node identity.
///
/// Undecodable identities are treated as a mismatch. No tunnel is opened
/// on success.
fn verify_handshake(claimed: &str, state: &AppState) -> Response<Full<Bytes>> {
    match claimed.parse::<NodeId>() {
        Ok(id) if id.ct_eq(&state.node_id) => {
            logger::log_debug("Handshake accepted");
            http::build_ok_response(HANDSHAKE_OK)
        }
        Ok(_) => {
            logger::log_warning("Handshake rejected: identity mismatch");
            http::build_403_response()
        }
        Err(e) => {
            logger::log_warning(&format!("Handshake rejected: {e}"));
            http::build_403_response()
        }
    }
}

fn header_value<B>(req: &Request<B>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

const fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
}
