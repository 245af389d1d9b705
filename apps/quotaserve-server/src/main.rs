//! quotaserve server binary.
//!
//! Loads the quota bucket configuration from a text file, normalizes it,
//! hands it to the in-memory store, and serves the admin console and REST
//! API over HTTP.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `ADMIN_LISTEN` | `0.0.0.0:8080` | Bind address |
//! | `CONFIG_FILE` | *(unset = empty config)* | Path to the YAML configuration |
//! | `ASSETS_DIR` | *(unset = no UI)* | Directory with console templates |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as HttpConnBuilder;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use quotaserve_admin_core::{MemoryConfigStore, ServerConfig};
use quotaserve_admin_http::{AdminHttpConfig, AdminHttpService};
use quotaserve_config::ServiceConfig;

/// Server version reported at startup.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` config value.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    Ok(())
}

/// Load and normalize the service configuration.
///
/// A structurally invalid file aborts startup; nothing is partially loaded.
fn load_service_config(config: &ServerConfig) -> Result<ServiceConfig> {
    let Some(path) = config.config_file.as_deref() else {
        info!("no CONFIG_FILE set, starting with an empty configuration");
        return Ok(ServiceConfig::new());
    };

    let bytes =
        std::fs::read(path).with_context(|| format!("cannot read configuration file {path}"))?;
    quotaserve_config::read_config(&bytes)
        .with_context(|| format!("invalid configuration file {path}"))
}

/// Build the [`AdminHttpConfig`] from the [`ServerConfig`].
fn build_admin_http_config(config: &ServerConfig) -> AdminHttpConfig {
    AdminHttpConfig {
        assets_dir: config.assets_dir.as_ref().map(Into::into),
    }
}

/// Run the accept loop, serving connections until a shutdown signal is received.
async fn serve(listener: TcpListener, service: AdminHttpService<MemoryConfigStore>) -> Result<()> {
    let graceful = hyper_util::server::graceful::GracefulShutdown::new();
    let http = HttpConnBuilder::new(TokioExecutor::new());

    let shutdown = async {
        tokio::signal::ctrl_c().await.ok();
        info!("received shutdown signal, draining connections");
    };

    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            result = listener.accept() => {
                let (stream, peer_addr) = match result {
                    Ok(conn) => conn,
                    Err(e) => {
                        warn!(error = %e, "failed to accept connection");
                        continue;
                    }
                };

                let svc = service.clone();
                let conn = http.serve_connection(TokioIo::new(stream), svc);
                let conn = graceful.watch(conn.into_owned());

                tokio::spawn(async move {
                    if let Err(e) = conn.await {
                        error!(peer_addr = %peer_addr, error = %e, "connection error");
                    }
                });
            }

            () = &mut shutdown => {
                info!("shutting down gracefully");
                break;
            }
        }
    }

    // Wait for in-flight requests to complete.
    graceful.shutdown().await;
    info!("all connections drained, exiting");

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let server_config = ServerConfig::from_env();
    init_tracing(&server_config.log_level)?;

    let service_config = load_service_config(&server_config)?;
    info!(
        version = service_config.version,
        namespaces = service_config.namespaces.len(),
        "loaded configuration",
    );

    let store = Arc::new(MemoryConfigStore::new(service_config));
    let admin_http_config = build_admin_http_config(&server_config);

    if admin_http_config.assets_dir.is_none() {
        info!("no ASSETS_DIR set, serving REST endpoints only");
    }

    let service = AdminHttpService::new(store, admin_http_config);

    let addr: SocketAddr = server_config
        .admin_listen
        .parse()
        .with_context(|| format!("invalid bind address: {}", server_config.admin_listen))?;

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    info!(%addr, version = VERSION, "starting quotaserve admin server");

    serve(listener, service).await
}
