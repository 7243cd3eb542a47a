use anyhow::Context;
use log::info;
use stickywall_core::db::open_db;
use stickywall_core::{init_logging, init_stderr_logging};
use stickywall_server::{build_router, AppState, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_env()?;

    match config.log_dir.as_deref() {
        Some(dir) => init_logging(&config.log_level, dir),
        None => init_stderr_logging(&config.log_level),
    }
    .map_err(anyhow::Error::msg)?;

    let conn = open_db(&config.db_path)
        .with_context(|| format!("failed to open note store {}", config.db_path.display()))?;
    let state = AppState::new(conn, config.public_dir.clone(), config.max_body_bytes);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port))
        .await
        .with_context(|| format!("failed to bind port {}", config.port))?;
    info!(
        "event=server_listen module=http status=ok addr={} public_dir={}",
        listener.local_addr()?,
        config.public_dir.display()
    );

    axum::serve(listener, app).await?;
    Ok(())
}
