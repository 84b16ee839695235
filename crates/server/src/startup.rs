use std::net::SocketAddr;

use configs::{AppConfig, ServerConfig};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::{
    errors::StartupError,
    routes::{self, ApiRoutes},
    state::AppState,
};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

pub fn bind_addr(server: &ServerConfig) -> Result<SocketAddr, StartupError> {
    let addr = format!("{}:{}", server.host, server.port);
    addr.parse().map_err(|source| StartupError::BindAddr { addr, source })
}

/// Connects the database, applies migrations and serves until `shutdown` resolves.
pub async fn run<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let db = models::db::connect_and_migrate(&cfg.database).await?;
    let app = routes::build_router(AppState::new(db), &ApiRoutes::with_prefix(&cfg.api.prefix), build_cors());

    let addr = bind_addr(&cfg.server)?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, prefix = %cfg.api.prefix, "listening");
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    info!("server stopped");
    Ok(())
}
