//! things-crud: a server-rendered CRUD resource ("Thing") over PostgreSQL.

pub mod app;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod method_override;
pub mod migration;
pub mod model;
pub mod repo;
pub mod response;
pub mod routes;
pub mod schema;
pub mod service;
pub mod state;
pub mod store;
pub mod views;

pub use app::build_app;
pub use config::{AppConfig, StorageConfig};
pub use error::{AppError, ConfigError, HtmlError};
pub use migration::apply_migrations;
pub use model::{Thing, ThingAttrs, ThingParams};
pub use repo::{MemoryThingRepository, PgThingRepository, ThingRepository};
pub use service::ThingService;
pub use state::AppState;
pub use store::{ensure_database_exists, open_repository};
