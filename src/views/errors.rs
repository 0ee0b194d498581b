use super::layout;
use axum::http::StatusCode;

/// Static error page for a status code.
pub fn page(status: StatusCode) -> String {
    let (heading, detail) = match status {
        StatusCode::NOT_FOUND => (
            "The page you were looking for doesn't exist.",
            "You may have mistyped the address or the page may have moved.",
        ),
        s if s.is_client_error() => (
            "The change you wanted was rejected.",
            "Maybe you tried to change something you didn't have access to.",
        ),
        _ => (
            "We're sorry, but something went wrong.",
            "If you are the application owner check the logs for more information.",
        ),
    };
    layout(
        status.canonical_reason().unwrap_or("Error"),
        None,
        &format!("<h1>{}</h1>\n<p>{}</p>\n", heading, detail),
    )
}
