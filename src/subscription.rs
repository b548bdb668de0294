//! Subscription payload
//!
//! Clients fetch a base64-encoded `vless://` descriptor and configure
//! themselves from it. TLS terminates at the edge on port 443; the node
//! itself never negotiates encryption.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::config::Config;

/// Port advertised to clients (TLS edge)
pub const EDGE_PORT: u16 = 443;
/// TLS client fingerprint tag
pub const FINGERPRINT: &str = "chrome";
/// Transport type
pub const TRANSPORT: &str = "xhttp";
/// Transport mode
pub const MODE: &str = "packet-up";

/// Build the plain `vless://` connection descriptor
pub fn build_link(config: &Config) -> String {
    let Config {
        uuid,
        domain,
        xpath,
        name,
        ..
    } = config;

    format!(
        "vless://{uuid}@{domain}:{EDGE_PORT}?encryption=none&security=tls&sni={domain}\
         &fp={FINGERPRINT}&type={TRANSPORT}&host={domain}&path=%2F{xpath}&mode={MODE}#{name}"
    )
}

/// Build the response body served on the subscription path
pub fn build_payload(config: &Config) -> String {
    let mut payload = STANDARD.encode(build_link(config));
    payload.push('\n');
    payload
}
