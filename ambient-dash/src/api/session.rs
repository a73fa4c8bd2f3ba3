//! Session extraction from incoming requests
//!
//! The provider token is taken from, in order:
//! 1. `Authorization: Bearer <token>` header
//! 2. `provider_token` cookie (set by the OAuth callback)
//!
//! Extraction never rejects. A request without a token yields an anonymous
//! session and the mood pipeline reports `Unauthenticated`.

use ambient_common::Session;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use std::convert::Infallible;

/// Cookie holding the music provider access token
pub const PROVIDER_TOKEN_COOKIE: &str = "provider_token";

/// Extractor wrapping the request's [`Session`]
#[derive(Debug, Clone)]
pub struct ProviderSession(pub Session);

#[async_trait]
impl<S> FromRequestParts<S> for ProviderSession
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(ProviderSession(session_from_headers(&parts.headers)))
    }
}

/// Build a session from request headers
pub fn session_from_headers(headers: &HeaderMap) -> Session {
    bearer_token(headers)
        .or_else(|| cookie_value(headers, PROVIDER_TOKEN_COOKIE))
        .map(Session::with_token)
        .filter(Session::is_authenticated)
        .unwrap_or_else(Session::anonymous)
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then(|| token.to_string())
}

fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| unquote(value.trim()).trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Strip one pair of surrounding double quotes (RFC 6265 `cookie-value`)
fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}
