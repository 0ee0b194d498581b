//! things-server: serves the Thing resource over HTTP.
//!
//! Configuration comes from the environment (or a `.env` file):
//! `DATABASE_URL`, `BIND_ADDR`, `DATABASE_MAX_CONNECTIONS`, `BODY_LIMIT_BYTES`.
//! Run from repo root: `cargo run -p things-server`

use things_crud::{build_app, open_repository, AppConfig, AppState};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("things_crud=info,things_server=info,tower_http=info")),
        )
        .init();

    let repo = open_repository(&config.storage).await?;
    let listener = TcpListener::bind(config.bind_addr).await?;
    let app = build_app(AppState::new(repo, config));

    tracing::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
