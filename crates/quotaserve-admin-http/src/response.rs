//! Admin response construction and error formatting.

use crate::body::AdminResponseBody;
use crate::error::AdminError;

/// Content type for JSON API responses.
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Content type for rendered console pages.
pub const CONTENT_TYPE_HTML: &str = "text/html; charset=utf-8";

/// Build a 200 response carrying a JSON body.
#[must_use]
pub fn json_response(json: Vec<u8>) -> http::Response<AdminResponseBody> {
    http::Response::builder()
        .status(http::StatusCode::OK)
        .header("content-type", CONTENT_TYPE_JSON)
        .body(AdminResponseBody::from_bytes(json))
        .expect("valid JSON response")
}

/// Build an empty 200 response acknowledging a mutation.
#[must_use]
pub fn empty_response() -> http::Response<AdminResponseBody> {
    http::Response::builder()
        .status(http::StatusCode::OK)
        .body(AdminResponseBody::empty())
        .expect("valid empty response")
}

/// Build a 200 response carrying a rendered console page.
#[must_use]
pub fn html_response(html: String) -> http::Response<AdminResponseBody> {
    http::Response::builder()
        .status(http::StatusCode::OK)
        .header("content-type", CONTENT_TYPE_HTML)
        .body(AdminResponseBody::from_bytes(html))
        .expect("valid HTML response")
}

/// Build a permanent redirect to `location`.
#[must_use]
pub fn redirect_permanent(location: &str) -> http::Response<AdminResponseBody> {
    http::Response::builder()
        .status(http::StatusCode::MOVED_PERMANENTLY)
        .header("location", location)
        .body(AdminResponseBody::empty())
        .expect("valid redirect response")
}

/// Build a 404 response for unknown routes, pages, and methods.
#[must_use]
pub fn not_found() -> http::Response<AdminResponseBody> {
    let json = serde_json::to_vec(&serde_json::json!({"error": "not found"}))
        .expect("JSON serialization of static error cannot fail");
    http::Response::builder()
        .status(http::StatusCode::NOT_FOUND)
        .header("content-type", CONTENT_TYPE_JSON)
        .body(AdminResponseBody::from_bytes(json))
        .expect("valid not-found response")
}

/// Convert an [`AdminError`] into a complete HTTP error response.
#[must_use]
pub fn error_to_response(error: &AdminError) -> http::Response<AdminResponseBody> {
    let json = serde_json::to_vec(&serde_json::json!({"error": error.to_string()}))
        .expect("JSON serialization of error cannot fail");
    http::Response::builder()
        .status(error.status_code())
        .header("content-type", CONTENT_TYPE_JSON)
        .body(AdminResponseBody::from_bytes(json))
        .expect("valid error response")
}
