//! HTTP response building module
//!
//! Every route answers with a short plain-text body.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// Build a plain-text response with the given status
pub fn build_text_response(status: StatusCode, body: impl Into<Bytes>) -> Response<Full<Bytes>> {
    let body = body.into();
    let content_length = body.len();

    Response::builder()
        .status(status)
        .header("Content-Type", TEXT_PLAIN)
        .header("Content-Length", content_length)
        .body(Full::new(body.clone()))
        .unwrap_or_else(|e| {
            log_build_error(status, &e);
            let mut response = Response::new(Full::new(body));
            *response.status_mut() = status;
            response
        })
}

/// Build 200 OK response
pub fn build_ok_response(body: impl Into<Bytes>) -> Response<Full<Bytes>> {
    build_text_response(StatusCode::OK, body)
}

/// Build 403 Forbidden response
pub fn build_403_response() -> Response<Full<Bytes>> {
    build_text_response(StatusCode::FORBIDDEN, "Invalid UUID")
}

/// Build 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    build_text_response(StatusCode::NOT_FOUND, "Not Found")
}

fn log_build_error(status: StatusCode, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_404_headers() {
        let response = build_404_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()["Content-Type"], TEXT_PLAIN);
        assert_eq!(response.headers()["Content-Length"], "9");
    }

    #[test]
    fn test_403_status() {
        assert_eq!(build_403_response().status(), StatusCode::FORBIDDEN);
    }
}
