//! One-time notices carried across a redirect in a cookie.

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap, HeaderValue},
    response::{IntoResponse, Response},
};

/// Cookie holding the pending notice.
pub const FLASH_COOKIE: &str = "flash";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Notice {
    Created,
    Updated,
    Destroyed,
}

impl Notice {
    pub fn message(self) -> &'static str {
        match self {
            Notice::Created => "Thing was successfully created.",
            Notice::Updated => "Thing was successfully updated.",
            Notice::Destroyed => "Thing was successfully destroyed.",
        }
    }

    fn token(self) -> &'static str {
        match self {
            Notice::Created => "created",
            Notice::Updated => "updated",
            Notice::Destroyed => "destroyed",
        }
    }

    fn from_token(token: &str) -> Option<Self> {
        match token {
            "created" => Some(Notice::Created),
            "updated" => Some(Notice::Updated),
            "destroyed" => Some(Notice::Destroyed),
            _ => None,
        }
    }
}

/// Notice pending for this request, if any. Rendering it must clear the cookie
/// (see `Flash::render`) so it shows only once.
#[derive(Clone, Copy, Debug, Default)]
pub struct Flash(pub Option<Notice>);

impl Flash {
    fn from_headers(headers: &HeaderMap) -> Self {
        let notice = headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(|v| v.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(k, _)| *k == FLASH_COOKIE)
            .and_then(|(_, v)| Notice::from_token(v.trim()));
        Flash(notice)
    }

    /// 200 HTML response that consumes the notice.
    pub fn render(self, html: String) -> Response {
        let mut response = axum::response::Html(html).into_response();
        if self.0.is_some() {
            response.headers_mut().insert(
                header::SET_COOKIE,
                HeaderValue::from_static("flash=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax"),
            );
        }
        response
    }

    /// 303 See Other to `location`, carrying `notice` to the next page.
    pub fn redirect(location: &str, notice: Notice) -> Response {
        let cookie = format!("{}={}; Path=/; HttpOnly; SameSite=Lax", FLASH_COOKIE, notice.token());
        let mut response = axum::response::Redirect::to(location).into_response();
        if let Ok(v) = HeaderValue::from_str(&cookie) {
            response.headers_mut().insert(header::SET_COOKIE, v);
        }
        response
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Flash
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Flash::from_headers(&parts.headers))
    }
}
