//! Database bootstrap: create the target database, open the pool, migrate, and pick the repository.

use crate::config::StorageConfig;
use crate::error::{AppError, ConfigError};
use crate::migration::apply_migrations;
use crate::repo::{MemoryThingRepository, PgThingRepository, ThingRepository};
use sqlx::postgres::PgConnectOptions;
use sqlx::ConnectOptions;
use std::str::FromStr;
use std::sync::Arc;

/// Open the configured storage, ready to serve. For PostgreSQL this creates the database
/// if needed and applies pending migrations.
pub async fn open_repository(storage: &StorageConfig) -> Result<Arc<dyn ThingRepository>, AppError> {
    match storage {
        StorageConfig::Memory => {
            tracing::warn!("using in-memory storage; data is lost on exit");
            Ok(Arc::new(MemoryThingRepository::new()))
        }
        StorageConfig::Postgres {
            database_url,
            max_connections,
        } => {
            ensure_database_exists(database_url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(*max_connections)
                .connect(database_url)
                .await?;
            let version = apply_migrations(&pool).await?;
            tracing::info!(schema_version = version, "database ready");
            Ok(Arc::new(PgThingRepository::new(pool)))
        }
    }
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin, db_name) = admin_options(database_url)?;
    let Some(db_name) = db_name else {
        return Ok(());
    };
    let mut conn: sqlx::PgConnection = admin.connect().await.map_err(AppError::Db)?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await
        .map_err(AppError::Db)?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await
            .map_err(AppError::Db)?;
    }
    Ok(())
}

/// Connection options for the `postgres` admin database on the same server, plus the
/// target database name when the URL names one other than `postgres`.
fn admin_options(database_url: &str) -> Result<(PgConnectOptions, Option<String>), AppError> {
    let target = PgConnectOptions::from_str(database_url).map_err(|_| ConfigError::Invalid {
        key: "DATABASE_URL",
        value: database_url.to_string(),
    })?;
    let db_name = target
        .get_database()
        .map(str::trim)
        .filter(|name| !name.is_empty() && *name != "postgres")
        .map(str::to_string);
    Ok((target.database("postgres"), db_name))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
