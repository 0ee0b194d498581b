use super::ThingRepository;
use crate::error::AppError;
use crate::model::{Thing, ThingAttrs};
use crate::schema::{things, THINGS};
use async_trait::async_trait;
use sqlx::PgPool;

/// SQLSTATE for unique_violation.
const UNIQUE_VIOLATION: &str = "23505";

pub struct PgThingRepository {
    pool: PgPool,
}

impl PgThingRepository {
    pub fn new(pool: PgPool) -> Self {
        PgThingRepository { pool }
    }
}

fn map_write_error(e: sqlx::Error, name: &str) -> AppError {
    if let sqlx::Error::Database(ref db) = e {
        if db.code().as_deref() == Some(UNIQUE_VIOLATION) {
            return AppError::Conflict(name.to_string());
        }
    }
    AppError::Db(e)
}

#[async_trait]
impl ThingRepository for PgThingRepository {
    fn backend_tag(&self) -> &'static str {
        "postgres"
    }

    async fn all(&self) -> Result<Vec<Thing>, AppError> {
        let sql = format!(
            "SELECT {} FROM {} ORDER BY {}",
            THINGS.select_list(),
            THINGS.name,
            things::ID
        );
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, Thing>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn find(&self, id: i64) -> Result<Option<Thing>, AppError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE {} = $1",
            THINGS.select_list(),
            THINGS.name,
            things::ID
        );
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, Thing>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn name_taken(&self, name: &str, except: Option<i64>) -> Result<bool, AppError> {
        let sql = format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE {} = $1 AND ($2::BIGINT IS NULL OR {} <> $2))",
            THINGS.name,
            things::NAME,
            things::ID
        );
        tracing::debug!(sql = %sql, thing_name = name, except = ?except, "query");
        let taken: (bool,) = sqlx::query_as(&sql)
            .bind(name)
            .bind(except)
            .fetch_one(&self.pool)
            .await?;
        Ok(taken.0)
    }

    async fn insert(&self, attrs: &ThingAttrs) -> Result<Thing, AppError> {
        let sql = format!(
            "INSERT INTO {} ({}, {}) VALUES ($1, $2) RETURNING {}",
            THINGS.name,
            things::NAME,
            things::DESCRIPTION,
            THINGS.select_list()
        );
        tracing::debug!(sql = %sql, "query");
        sqlx::query_as::<_, Thing>(&sql)
            .bind(&attrs.name)
            .bind(attrs.description.as_deref())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_write_error(e, &attrs.name))
    }

    async fn update(&self, id: i64, attrs: &ThingAttrs) -> Result<Option<Thing>, AppError> {
        let sql = format!(
            "UPDATE {} SET {} = $1, {} = $2, {} = NOW() WHERE {} = $3 RETURNING {}",
            THINGS.name,
            things::NAME,
            things::DESCRIPTION,
            things::UPDATED_AT,
            things::ID,
            THINGS.select_list()
        );
        tracing::debug!(sql = %sql, id, "query");
        sqlx::query_as::<_, Thing>(&sql)
            .bind(&attrs.name)
            .bind(attrs.description.as_deref())
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_write_error(e, &attrs.name))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let sql = format!("DELETE FROM {} WHERE {} = $1", THINGS.name, things::ID);
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}
