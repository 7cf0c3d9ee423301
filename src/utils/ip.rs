use axum::http::HeaderMap;
use std::net::IpAddr;

/// Best-effort client address for the session audit record. Walks
/// x-forwarded-for first (proxied deployments), then x-real-ip.
pub fn client_ip(headers: &HeaderMap) -> Option<String> {
    if let Some(raw) = headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
    {
        for part in raw.split(',').map(str::trim).filter(|v| !v.is_empty()) {
            if let Ok(ip) = part.parse::<IpAddr>() {
                return Some(ip.to_string());
            }
        }
    }

    headers
        .get("x-real-ip")
        .and_then(|value| value.to_str().ok())
        .and_then(|raw| raw.trim().parse::<IpAddr>().ok())
        .map(|ip| ip.to_string())
}

pub fn user_agent(headers: &HeaderMap) -> Option<String> {
    headers
        .get(axum::http::header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}
