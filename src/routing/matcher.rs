//! Route matching module
//!
//! Maps a request path onto one of the node's fixed routes.

use crate::config::AppState;

/// Matched route for a request path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route<'a> {
    /// `/`
    Root,
    /// `/{sub_path}`
    Subscription,
    /// `/{xpath}/{claimed}`, carrying the claimed identity segment
    Handshake(&'a str),
    NotFound,
}

/// Match a path against the configured routes, in priority order
pub fn match_route<'a>(path: &'a str, state: &AppState) -> Route<'a> {
    if path == "/" {
        return Route::Root;
    }

    if path == state.subscription_path {
        return Route::Subscription;
    }

    if let Some(claimed) = handshake_segment(path, &state.handshake_prefix) {
        return Route::Handshake(claimed);
    }

    Route::NotFound
}

/// First non-empty segment following the handshake prefix
fn handshake_segment<'a>(path: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = path.strip_prefix(prefix)?;
    let segment = rest.split('/').next().unwrap_or_default();
    (!segment.is_empty()).then_some(segment)
}
