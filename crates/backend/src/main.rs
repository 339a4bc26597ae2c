pub mod handlers;
pub mod routes;
pub mod shared;
pub mod system;

use contracts::shared::debug_log::LogLevel;
use std::net::SocketAddr;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    system::tracing::initialize()?;

    let config = shared::config::init_config()?;

    let db_path = shared::config::get_database_path(config);
    shared::data::db::initialize_database(&db_path)
        .await
        .map_err(|e| anyhow::anyhow!("db init failed: {e}"))?;

    let dist_dir = shared::config::resolve_path(&config.frontend.dist_dir);
    tracing::info!("Serving frontend bundle from {}", dist_dir.display());

    let state = routes::AppState::new(&config.auth.token, dist_dir);
    let app = routes::configure_routes(state);

    let port = config.server.port;
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();

    tracing::info!("Attempting to bind server to http://{}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => {
            tracing::info!("Server successfully bound to {}", addr);
            listener
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!(
                    "Error: Port {} is already in use. Please ensure no other process is using this port.",
                    port
                );
            } else {
                tracing::error!("Failed to bind to port {}. Error: {}", port, e);
            }
            return Err(e.into());
        }
    };

    shared::debug_log::log(
        LogLevel::Info,
        "core",
        &format!("Debug log service listening on port {}", port),
        serde_json::Value::Null,
    );

    axum::serve(listener, app).await?;

    Ok(())
}
