//! Route tables.

mod api;
mod common;
mod things;

pub use api::api_routes;
pub use common::{common_routes, common_routes_with_ready};
pub use things::thing_routes;
