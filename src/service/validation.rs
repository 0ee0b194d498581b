//! Validation rules for Thing attributes.

use crate::error::AppError;
use crate::model::{ErrorKind, FieldError, ThingAttrs, ValidationErrors};
use crate::repo::ThingRepository;
use crate::schema::things;

pub struct ThingValidator;

impl ThingValidator {
    /// Run presence then uniqueness on `name`. `except` is the id of the record being
    /// updated, so a record never collides with itself.
    pub async fn validate(
        repo: &dyn ThingRepository,
        attrs: &ThingAttrs,
        except: Option<i64>,
    ) -> Result<ValidationErrors, AppError> {
        let mut errors = Self::validate_presence(attrs);
        if !errors.has(things::NAME, ErrorKind::Blank)
            && repo.name_taken(&attrs.name, except).await?
        {
            errors.push(FieldError::taken(things::NAME));
        }
        Ok(errors)
    }

    /// Rules that need no storage access. Whitespace-only counts as blank.
    pub fn validate_presence(attrs: &ThingAttrs) -> ValidationErrors {
        let mut errors = ValidationErrors::default();
        if attrs.name.trim().is_empty() {
            errors.push(FieldError::blank(things::NAME));
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::MemoryThingRepository;

    fn attrs(name: &str) -> ThingAttrs {
        ThingAttrs {
            name: name.into(),
            description: None,
        }
    }

    #[test]
    fn blank_names() {
        for name in ["", "   ", "\t\n"] {
            let errors = ThingValidator::validate_presence(&attrs(name));
            assert!(errors.has("name", ErrorKind::Blank), "{:?}", name);
        }
        assert!(ThingValidator::validate_presence(&attrs("x")).is_empty());
    }

    #[tokio::test]
    async fn taken_excludes_self() {
        let repo = MemoryThingRepository::new();
        let lamp = repo.insert(&attrs("lamp")).await.unwrap();

        let errors = ThingValidator::validate(&repo, &attrs("lamp"), None).await.unwrap();
        assert!(errors.has("name", ErrorKind::Taken));

        let errors = ThingValidator::validate(&repo, &attrs("lamp"), Some(lamp.id)).await.unwrap();
        assert!(errors.is_empty());

        // Comparison is case-sensitive.
        let errors = ThingValidator::validate(&repo, &attrs("Lamp"), None).await.unwrap();
        assert!(errors.is_empty());
    }

    #[tokio::test]
    async fn blank_skips_uniqueness() {
        let repo = MemoryThingRepository::new();
        let errors = ThingValidator::validate(&repo, &attrs(""), None).await.unwrap();
        assert_eq!(errors.len(), 1);
    }
}
