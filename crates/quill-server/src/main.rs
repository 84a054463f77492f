use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use quill_api::mailer::Mailer;
use quill_api::{AppState, AppStateInner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quill=debug,tower_http=debug".into()),
        )
        .init();

    // Config
    let db_path = std::env::var("QUILL_DB_PATH").unwrap_or_else(|_| "quill.db".into());
    let host = std::env::var("QUILL_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("QUILL_PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()?;
    let app_url =
        std::env::var("QUILL_APP_URL").unwrap_or_else(|_| format!("http://localhost:{port}"));
    let mail_webhook = std::env::var("QUILL_MAIL_WEBHOOK_URL").ok();

    // Init database
    let db = quill_db::Database::open(&PathBuf::from(&db_path))?;

    // Shared state
    let mailer = Mailer::new(app_url, mail_webhook);
    let state: AppState = Arc::new(AppStateInner { db, mailer });

    let app = quill_api::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Quill server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
