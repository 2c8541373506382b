use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

pub const API_KEY_HEADER: &str = "x-api-key";

/// Raw `x-api-key` header value as presented by the caller, injected by
/// `api_key_middleware`. Whether it is present, empty or valid is decided by
/// the gateway, so the middleware itself never rejects a request.
#[derive(Clone, Default)]
pub struct PresentedKey(pub Option<String>);

impl PresentedKey {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        // Non-UTF-8 bytes still count as a presented (and then unknown) key
        let value = headers
            .get(API_KEY_HEADER)
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned());
        Self(value)
    }

    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl std::fmt::Debug for PresentedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            Some(_) => f.write_str("PresentedKey(<redacted>)"),
            None => f.write_str("PresentedKey(None)"),
        }
    }
}

/// Copies the API key header into request extensions for content handlers
pub async fn api_key_middleware(headers: HeaderMap, mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(PresentedKey::from_headers(&headers));
    next.run(request).await
}
