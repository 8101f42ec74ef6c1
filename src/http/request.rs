//! Request identification.
//!
//! # Responsibilities
//! - Name the request ID header shared by every layer
//! - Read the ID assigned by `SetRequestIdLayer` for log correlation
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing (outermost layer)
//! - The ID is echoed back on the response

use axum::http::HeaderMap;

/// Header carrying the request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Request ID assigned to the request, or `"unknown"`.
pub fn request_id(headers: &HeaderMap) -> &str {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_request_id() {
        let mut headers = HeaderMap::new();
        assert_eq!(request_id(&headers), "unknown");
        headers.insert(X_REQUEST_ID, HeaderValue::from_static("abc-123"));
        assert_eq!(request_id(&headers), "abc-123");
    }
}
