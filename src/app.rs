//! Application assembly: routes, method override, body limit, request tracing.

use crate::method_override::method_override;
use crate::routes::{api_routes, common_routes_with_ready, thing_routes};
use crate::state::AppState;
use axum::Router;
use tower::Layer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Full router for `state`. The method override wraps the inner router so a rewritten
/// method is seen by route dispatch.
pub fn build_app(state: AppState) -> Router {
    let body_limit = state.config.body_limit_bytes;
    let routes = Router::new()
        .merge(common_routes_with_ready(state.clone()))
        .merge(thing_routes(state.clone()))
        .nest("/api/v1", api_routes(state));
    let routes = axum::middleware::from_fn(method_override).layer(routes);

    Router::new()
        .fallback_service(routes)
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(TraceLayer::new_for_http())
}
