//! Northwind demo server.

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use northwind_sql::config::{AppConfig, Args, LogFormat};
use northwind_sql::schema::seed_if_empty;
use northwind_sql::sqlite::SqliteExecutor;
use northwind_sql::web::{AppState, create_app};

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Pretty => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_args(Args::parse());
    init_tracing(config.log_format);

    let executor = SqliteExecutor::builder(config.db_path.to_string_lossy().into_owned())
        .pool_size(config.pool_size)
        .busy_timeout(config.busy_timeout)
        .served_by(config.served_by.clone())
        .build()
        .await?;

    if config.seed_demo {
        seed_if_empty(&executor).await?;
    }

    let state = AppState::from_config(Arc::new(executor), &config);
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(config.listen).await?;
    tracing::info!(
        addr = %config.listen,
        db = %config.db_path.display(),
        expose_errors = config.expose_errors,
        "northwind listening"
    );
    axum::serve(listener, app).await?;

    Ok(())
}
