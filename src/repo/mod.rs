//! Persistence boundary for Things.

mod memory;
mod pg;

pub use memory::MemoryThingRepository;
pub use pg::PgThingRepository;

use crate::error::AppError;
use crate::model::{Thing, ThingAttrs};
use async_trait::async_trait;

/// Storage for Things. Writes that would duplicate a name fail with `AppError::Conflict`.
#[async_trait]
pub trait ThingRepository: Send + Sync {
    fn backend_tag(&self) -> &'static str;

    /// All Things, ordered by id.
    async fn all(&self) -> Result<Vec<Thing>, AppError>;

    async fn find(&self, id: i64) -> Result<Option<Thing>, AppError>;

    /// Whether a Thing other than `except` already uses `name`.
    async fn name_taken(&self, name: &str, except: Option<i64>) -> Result<bool, AppError>;

    async fn insert(&self, attrs: &ThingAttrs) -> Result<Thing, AppError>;

    async fn update(&self, id: i64, attrs: &ThingAttrs) -> Result<Option<Thing>, AppError>;

    /// Returns false when no row had that id.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Cheap reachability check for readiness probes.
    async fn ping(&self) -> Result<(), AppError>;
}
