//! Client identification utilities
//!
//! Resolves the caller's IP address behind Cloudflare or a reverse proxy.
//! The address is forwarded to Turnstile as `remoteip`.

use std::convert::Infallible;
use std::net::{IpAddr, SocketAddr};

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::{HeaderMap, request::Parts};

/// Proxy headers consulted in order. `X-Forwarded-For` contributes its
/// first (client-most) entry.
const IP_HEADERS: [&str; 4] = [
    "cf-connecting-ip",
    "x-forwarded-for",
    "x-real-ip",
    "x-client-ip",
];

/// Extract client IP address from headers
///
/// ## Arguments
/// * `headers` - HTTP request headers
/// * `direct_ip` - Socket peer address, used when no header is usable
///
/// ## Returns
/// The client IP address, or None if not determinable
pub fn extract_client_ip(headers: &HeaderMap, direct_ip: Option<IpAddr>) -> Option<IpAddr> {
    IP_HEADERS
        .iter()
        .find_map(|name| {
            let value = headers.get(*name)?.to_str().ok()?;
            value.split(',').next()?.trim().parse::<IpAddr>().ok()
        })
        .or(direct_ip)
}

/// Axum extractor yielding the resolved client IP.
///
/// Never rejects; the address is `None` when neither the headers nor
/// `ConnectInfo` provide one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientIp(pub Option<IpAddr>);

impl<S> FromRequestParts<S> for ClientIp
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let direct = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip());

        Ok(Self(extract_client_ip(&parts.headers, direct)))
    }
}
