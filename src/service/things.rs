//! Thing lifecycle: list, find, create, update, destroy.

use crate::error::AppError;
use crate::model::{FieldError, Thing, ThingAttrs};
use crate::repo::ThingRepository;
use crate::schema::things;
use crate::service::ThingValidator;

pub struct ThingService;

impl ThingService {
    pub async fn list(repo: &dyn ThingRepository) -> Result<Vec<Thing>, AppError> {
        repo.all().await
    }

    /// Fetch one Thing or fail with NotFound.
    pub async fn find(repo: &dyn ThingRepository, id: i64) -> Result<Thing, AppError> {
        repo.find(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Thing with id={}", id)))
    }

    /// Validate and insert. Nothing is written when validation fails.
    pub async fn create(repo: &dyn ThingRepository, attrs: &ThingAttrs) -> Result<Thing, AppError> {
        let errors = ThingValidator::validate(repo, attrs, None).await?;
        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }
        let thing = repo.insert(attrs).await.map_err(conflict_as_taken)?;
        tracing::info!(id = thing.id, "thing created");
        Ok(thing)
    }

    /// Validate and write `attrs` over the Thing with `id`.
    pub async fn update(
        repo: &dyn ThingRepository,
        id: i64,
        attrs: &ThingAttrs,
    ) -> Result<Thing, AppError> {
        let errors = ThingValidator::validate(repo, attrs, Some(id)).await?;
        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }
        let thing = repo
            .update(id, attrs)
            .await
            .map_err(conflict_as_taken)?
            .ok_or_else(|| AppError::NotFound(format!("Thing with id={}", id)))?;
        tracing::info!(id, "thing updated");
        Ok(thing)
    }

    /// Remove the Thing with `id`, returning what was removed.
    pub async fn destroy(repo: &dyn ThingRepository, id: i64) -> Result<Thing, AppError> {
        let thing = Self::find(repo, id).await?;
        if !repo.delete(id).await? {
            return Err(AppError::NotFound(format!("Thing with id={}", id)));
        }
        tracing::info!(id, "thing destroyed");
        Ok(thing)
    }
}

/// A concurrent writer claimed the name between validation and write.
fn conflict_as_taken(e: AppError) -> AppError {
    match e {
        AppError::Conflict(name) => {
            tracing::warn!(thing_name = %name, "unique index rejected name");
            AppError::Validation(FieldError::taken(things::NAME).into())
        }
        other => other,
    }
}
