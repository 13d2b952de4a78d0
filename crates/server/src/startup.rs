use std::{future::Future, net::SocketAddr, sync::Arc};

use axum::Router;
use configs::{AppConfig, DirectoryConfig};
use models::business::sample_directory;
use service::directory::{DirectoryRepository, DirectoryService, DirectoryStore};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn load_bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    let addr = format!("{}:{}", cfg.server.host, cfg.server.port);
    addr.parse()
        .map_err(|e: std::net::AddrParseError| StartupError::InvalidBindAddress { addr, reason: e.to_string() })
}

/// Open the directory store described by the config: seeded or empty,
/// in-memory or backed by a JSON snapshot.
pub async fn build_state(cfg: &DirectoryConfig) -> Result<ServerState, StartupError> {
    let initial = if cfg.seed { sample_directory() } else { Vec::new() };
    let repo: Arc<dyn DirectoryRepository> = match cfg.data_file.as_deref() {
        Some(path) => {
            info!(%path, seed = cfg.seed, "opening file-backed directory");
            DirectoryStore::open(path, initial).await?
        }
        None => {
            info!(seed = cfg.seed, "using in-memory directory");
            DirectoryStore::in_memory(initial)
        }
    };
    Ok(ServerState::new(DirectoryService::new(repo)))
}

pub fn build_app(state: ServerState, cfg: &AppConfig) -> Router {
    routes::build_router(state, build_cors(), &cfg.server.api_prefix)
}

/// Build the app and serve until `shutdown` resolves.
pub async fn run_until<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let state = build_state(&cfg.directory).await?;
    let app = build_app(state, &cfg);

    let addr = load_bind_addr(&cfg)?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, prefix = %cfg.server.api_prefix, "directory server listening");
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    info!("directory server drained");
    Ok(())
}

/// Public entry: serve until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    run_until(cfg, async {
        let _ = tokio::signal::ctrl_c().await;
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_from_config() {
        let cfg = AppConfig::default();
        assert_eq!(load_bind_addr(&cfg).unwrap(), "127.0.0.1:5001".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn bad_host_is_startup_error() {
        let mut cfg = AppConfig::default();
        cfg.server.host = "not a host".into();
        assert!(matches!(load_bind_addr(&cfg), Err(StartupError::InvalidBindAddress { .. })));
    }

    #[tokio::test]
    async fn unseeded_state_starts_empty() -> anyhow::Result<()> {
        let cfg = DirectoryConfig { seed: false, data_file: None };
        let state = build_state(&cfg).await?;
        assert!(state.directory.list_businesses().await?.is_empty());
        Ok(())
    }
}
