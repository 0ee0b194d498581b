//! Lets HTML forms reach PATCH/PUT/DELETE routes via a `_method` form field.
//! Must wrap the router as a whole: it rewrites the method before route dispatch.

use axum::{
    body::{Body, Bytes},
    extract::{FromRequest, Request},
    http::{header, HeaderMap, Method},
    middleware::Next,
    response::{IntoResponse, Response},
};

const OVERRIDE_FIELD: &[u8] = b"_method";

fn is_form(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim_start().starts_with("application/x-www-form-urlencoded"))
        .unwrap_or(false)
}

/// First `_method` value in a urlencoded body, if it names an overridable method.
pub fn override_method(body: &[u8]) -> Option<Method> {
    let value = body
        .split(|b| *b == b'&')
        .filter_map(|pair| {
            let mut kv = pair.splitn(2, |b| *b == b'=');
            let key = kv.next()?;
            let value = kv.next().unwrap_or_default();
            (key == OVERRIDE_FIELD).then_some(value)
        })
        .next()?;
    match value.to_ascii_lowercase().as_slice() {
        b"patch" => Some(Method::PATCH),
        b"put" => Some(Method::PUT),
        b"delete" => Some(Method::DELETE),
        _ => None,
    }
}

pub async fn method_override(req: Request, next: Next) -> Response {
    if req.method() != Method::POST || !is_form(req.headers()) {
        return next.run(req).await;
    }
    let (mut parts, body) = req.into_parts();
    let mut buffering = Request::new(body);
    *buffering.extensions_mut() = parts.extensions.clone();
    // Rejection is 413 past the body limit, 400 for any other read failure.
    let bytes = match Bytes::from_request(buffering, &()).await {
        Ok(b) => b,
        Err(rejection) => {
            tracing::warn!(error = %rejection.body_text(), "failed to buffer form body");
            return rejection.into_response();
        }
    };
    if let Some(method) = override_method(&bytes) {
        tracing::debug!(%method, uri = %parts.uri, "method override");
        parts.method = method;
    }
    next.run(Request::from_parts(parts, Body::from(bytes))).await
}
