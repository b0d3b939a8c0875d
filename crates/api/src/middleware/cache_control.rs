//! Cache headers for the client bundle.

use axum::extract::Request;
use axum::http::{header, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;

/// Content type served for JavaScript modules.
pub const JAVASCRIPT_CONTENT_TYPE: &str = "application/javascript; charset=utf-8";

/// Mark `.js` and `.css` responses as non-cacheable.
///
/// An explicit `Cache-Control` set by the handler is left alone. Successful
/// `.js` responses are also given [`JAVASCRIPT_CONTENT_TYPE`].
pub async fn cache_control(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    let mut response = next.run(request).await;

    let is_js = path.ends_with(".js");
    if is_js || path.ends_with(".css") {
        let success = response.status().is_success();
        let headers = response.headers_mut();
        headers
            .entry(header::CACHE_CONTROL)
            .or_insert(HeaderValue::from_static("no-cache"));
        if is_js && success {
            headers.insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static(JAVASCRIPT_CONTENT_TYPE),
            );
        }
    }

    response
}
