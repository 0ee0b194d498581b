//! Numbered schema migrations for the `things` table.
//! Pending steps run in ascending order inside one transaction; applied versions are
//! recorded in `schema_migrations`.

use crate::error::AppError;
use crate::schema::{things, ColumnDef, THINGS};
use sqlx::PgPool;

const MIGRATIONS_TABLE: &str = "schema_migrations";

#[derive(Clone, Copy, Debug)]
pub struct Migration {
    pub version: i64,
    pub name: &'static str,
    statements: fn() -> Vec<String>,
}

impl Migration {
    pub fn statements(&self) -> Vec<String> {
        (self.statements)()
    }
}

fn create_things() -> Vec<String> {
    let cols: Vec<String> = THINGS.columns_since(1).map(ColumnDef::ddl).collect();
    vec![format!(
        "CREATE TABLE IF NOT EXISTS {} (\n  {}\n)",
        THINGS.name,
        cols.join(",\n  ")
    )]
}

fn add_description_to_things() -> Vec<String> {
    THINGS
        .columns_since(2)
        .map(|c| format!("ALTER TABLE {} ADD COLUMN IF NOT EXISTS {}", THINGS.name, c.ddl()))
        .collect()
}

fn add_unique_index_on_things_name() -> Vec<String> {
    vec![format!(
        "CREATE UNIQUE INDEX IF NOT EXISTS {} ON {} ({})",
        things::NAME_UNIQUE_INDEX,
        THINGS.name,
        things::NAME
    )]
}

pub const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "create_things",
        statements: create_things,
    },
    Migration {
        version: 2,
        name: "add_description_to_things",
        statements: add_description_to_things,
    },
    Migration {
        version: 3,
        name: "add_unique_index_on_things_name",
        statements: add_unique_index_on_things_name,
    },
];

/// Latest migration version known by this binary.
pub fn latest_version() -> i64 {
    MIGRATIONS.last().map_or(0, |m| m.version)
}

/// Migrations with a version above `current`, in ascending order.
pub fn pending(current: i64) -> impl Iterator<Item = &'static Migration> {
    MIGRATIONS.iter().filter(move |m| m.version > current)
}

/// Key for the transaction-scoped advisory lock that serializes concurrent migrators.
const MIGRATION_LOCK_KEY: i64 = 0x7468_696e_6773;

/// Create the bookkeeping table and apply all pending migrations. Returns the resulting version.
/// Concurrent callers wait on an advisory lock; the second one finds the schema up to date.
pub async fn apply_migrations(pool: &PgPool) -> Result<i64, AppError> {
    let mut tx = pool.begin().await?;
    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(MIGRATION_LOCK_KEY)
        .execute(&mut *tx)
        .await?;

    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            version BIGINT PRIMARY KEY,
            name TEXT NOT NULL,
            applied_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
        MIGRATIONS_TABLE
    ))
    .execute(&mut *tx)
    .await?;

    let current: (Option<i64>,) =
        sqlx::query_as(&format!("SELECT MAX(version) FROM {}", MIGRATIONS_TABLE))
            .fetch_one(&mut *tx)
            .await?;
    let current = current.0.unwrap_or(0);
    let latest = latest_version();

    if current > latest {
        return Err(AppError::UnsupportedSchemaVersion {
            found: current,
            latest,
        });
    }
    if current == latest {
        tx.commit().await?;
        tracing::info!(version = current, "schema up to date");
        return Ok(current);
    }

    for m in pending(current) {
        tracing::info!(version = m.version, migration = %m.name, "applying migration");
        for sql in m.statements() {
            tracing::debug!(sql = %sql, "migration statement");
            sqlx::query(&sql).execute(&mut *tx).await?;
        }
        sqlx::query(&format!(
            "INSERT INTO {} (version, name) VALUES ($1, $2)",
            MIGRATIONS_TABLE
        ))
        .bind(m.version)
        .bind(m.name)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;
    Ok(latest)
}
