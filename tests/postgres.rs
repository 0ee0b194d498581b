//! Repository and migrations against a live PostgreSQL server.
//!
//! Run with `DATABASE_URL=postgres://... cargo test --test postgres -- --ignored`.
//! Each test works in its own freshly created database and drops it afterwards.

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{Connection, PgConnection, PgPool};
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use things_crud::migration::latest_version;
use things_crud::model::ErrorKind;
use things_crud::{apply_migrations, AppError, PgThingRepository, ThingAttrs, ThingRepository, ThingService};

static NEXT_DB: AtomicU32 = AtomicU32::new(0);

struct TestDb {
    url: String,
    name: String,
    pool: PgPool,
}

impl TestDb {
    async fn create() -> TestDb {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must point at PostgreSQL");
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock after epoch")
            .as_millis();
        let name = format!("things_test_{}_{}", stamp, NEXT_DB.fetch_add(1, Ordering::SeqCst));

        let mut admin = PgConnection::connect(&url).await.expect("connect admin");
        sqlx::query(&format!("CREATE DATABASE {}", name))
            .execute(&mut admin)
            .await
            .expect("create test database");
        admin.close().await.expect("close admin");

        let opts = PgConnectOptions::from_str(&url).expect("parse url").database(&name);
        let pool = PgPoolOptions::new()
            .max_connections(4)
            .connect_with(opts)
            .await
            .expect("connect test database");
        TestDb { url, name, pool }
    }

    async fn drop(self) {
        self.pool.close().await;
        let mut admin = PgConnection::connect(&self.url).await.expect("connect admin");
        sqlx::query(&format!("DROP DATABASE IF EXISTS {}", self.name))
            .execute(&mut admin)
            .await
            .expect("drop test database");
    }
}

fn attrs(name: &str) -> ThingAttrs {
    ThingAttrs {
        name: name.to_string(),
        description: None,
    }
}

#[tokio::test]
#[ignore = "needs DATABASE_URL pointing at PostgreSQL"]
async fn concurrent_startups_migrate_once() {
    let db = TestDb::create().await;

    let (a, b) = tokio::join!(apply_migrations(&db.pool), apply_migrations(&db.pool));
    assert_eq!(a.expect("first migrator"), latest_version());
    assert_eq!(b.expect("second migrator"), latest_version());
    assert_eq!(apply_migrations(&db.pool).await.expect("rerun"), latest_version());

    let (applied,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM schema_migrations")
        .fetch_one(&db.pool)
        .await
        .expect("count migrations");
    assert_eq!(applied, latest_version());

    db.drop().await;
}

#[tokio::test]
#[ignore = "needs DATABASE_URL pointing at PostgreSQL"]
async fn newer_database_schema_is_refused() {
    let db = TestDb::create().await;
    apply_migrations(&db.pool).await.expect("migrate");
    sqlx::query("INSERT INTO schema_migrations (version, name) VALUES (99, 'from_the_future')")
        .execute(&db.pool)
        .await
        .expect("record future version");

    match apply_migrations(&db.pool).await {
        Err(AppError::UnsupportedSchemaVersion { found, latest }) => {
            assert_eq!(found, 99);
            assert_eq!(latest, latest_version());
        }
        other => panic!("expected UnsupportedSchemaVersion, got {:?}", other),
    }

    db.drop().await;
}

#[tokio::test]
#[ignore = "needs DATABASE_URL pointing at PostgreSQL"]
async fn unique_index_rejects_duplicate_names() {
    let db = TestDb::create().await;
    apply_migrations(&db.pool).await.expect("migrate");
    let repo = PgThingRepository::new(db.pool.clone());

    let lamp = repo.insert(&attrs("lamp")).await.expect("first insert");
    assert!(matches!(repo.insert(&attrs("lamp")).await, Err(AppError::Conflict(_))));

    let chair = repo.insert(&attrs("chair")).await.expect("second name");
    assert!(matches!(
        repo.update(chair.id, &attrs("lamp")).await,
        Err(AppError::Conflict(_))
    ));
    assert_eq!(repo.all().await.expect("list").len(), 2);
    assert!(repo.name_taken("lamp", None).await.expect("taken"));
    assert!(!repo.name_taken("lamp", Some(lamp.id)).await.expect("own name"));

    db.drop().await;
}

#[tokio::test]
#[ignore = "needs DATABASE_URL pointing at PostgreSQL"]
async fn racing_creates_leave_one_row_and_report_taken() {
    let db = TestDb::create().await;
    apply_migrations(&db.pool).await.expect("migrate");
    let repo = PgThingRepository::new(db.pool.clone());

    let lamp = attrs("lamp");
    let results = futures::future::join_all((0..4).map(|_| ThingService::create(&repo, &lamp))).await;

    let created = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(created, 1);
    for result in results.into_iter().filter(|r| r.is_err()) {
        match result {
            Err(AppError::Validation(errors)) => assert!(errors.has("name", ErrorKind::Taken)),
            other => panic!("expected a taken error, got {:?}", other),
        }
    }
    assert_eq!(repo.all().await.expect("list").len(), 1);

    db.drop().await;
}

#[tokio::test]
#[ignore = "needs DATABASE_URL pointing at PostgreSQL"]
async fn update_and_delete_round_trip() {
    let db = TestDb::create().await;
    apply_migrations(&db.pool).await.expect("migrate");
    let repo = PgThingRepository::new(db.pool.clone());

    let created = ThingService::create(&repo, &attrs("lamp")).await.expect("create");
    let updated = ThingService::update(
        &repo,
        created.id,
        &ThingAttrs {
            name: "lamp".into(),
            description: Some("brass".into()),
        },
    )
    .await
    .expect("update");
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.description.as_deref(), Some("brass"));
    assert!(updated.updated_at >= created.updated_at);

    ThingService::destroy(&repo, created.id).await.expect("destroy");
    assert!(matches!(
        ThingService::find(&repo, created.id).await,
        Err(AppError::NotFound(_))
    ));

    db.drop().await;
}
