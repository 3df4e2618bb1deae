//! Client metadata extractor
//!
//! Collects the caller's address and user agent for the audit columns of a
//! feedback row. Never used to identify a guest.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use gallery_core::ClientInfo;

use crate::response::ApiError;

const FORWARDED_FOR: &str = "x-forwarded-for";
const REAL_IP: &str = "x-real-ip";

#[derive(Debug, Clone, Default)]
pub struct RequestClientInfo(pub ClientInfo);

fn header_str(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}

impl RequestClientInfo {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        // first hop of x-forwarded-for is the original client
        let ip_address = header_str(headers, FORWARDED_FOR)
            .and_then(|list| list.split(',').next().map(|ip| ip.trim().to_string()))
            .or_else(|| header_str(headers, REAL_IP));

        Self(ClientInfo {
            ip_address,
            user_agent: header_str(headers, header::USER_AGENT.as_str()),
        })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RequestClientInfo
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_forwarded_for_first_hop() {
        let mut headers = HeaderMap::new();
        headers.insert(FORWARDED_FOR, HeaderValue::from_static("203.0.113.7, 10.0.0.1"));
        headers.insert(REAL_IP, HeaderValue::from_static("10.0.0.1"));
        headers.insert(header::USER_AGENT, HeaderValue::from_static("Mozilla/5.0"));

        let RequestClientInfo(info) = RequestClientInfo::from_headers(&headers);
        assert_eq!(info.ip_address.as_deref(), Some("203.0.113.7"));
        assert_eq!(info.user_agent.as_deref(), Some("Mozilla/5.0"));
    }

    #[test]
    fn test_missing_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(REAL_IP, HeaderValue::from_static("198.51.100.2"));

        let RequestClientInfo(info) = RequestClientInfo::from_headers(&headers);
        assert_eq!(info.ip_address.as_deref(), Some("198.51.100.2"));
        assert!(info.user_agent.is_none());

        let RequestClientInfo(info) = RequestClientInfo::from_headers(&HeaderMap::new());
        assert_eq!(info, ClientInfo::default());
    }
}
