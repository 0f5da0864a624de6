pub mod api;
pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod infra;

use api::AppState;
use config::AppConfig;
use infra::init_db;

/// Open the store and serve HTTP until Ctrl-C.
pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    let pool = init_db(&config.database_path).map_err(|e| {
        log::error!("DB init failed: {}", e);
        e
    })?;
    let app = api::router(AppState::new(pool));

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    log::info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("shutdown signal received");
}
