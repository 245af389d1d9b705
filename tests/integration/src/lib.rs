//! Integration tests for the quotaserve admin server.
//!
//! Each test spins up the real HTTP service on an ephemeral port and
//! drives it with `reqwest`, exercising the full pipeline: routing, body
//! decoding, store semantics, and response formatting.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, Once};

use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as HttpConnBuilder;

use quotaserve_admin_core::MemoryConfigStore;
use quotaserve_admin_http::{AdminHttpConfig, AdminHttpService};

#[cfg(test)]
mod test_admin_api;
#[cfg(test)]
mod test_console;

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// A text configuration used by most tests: one namespace with a single
/// partially-specified bucket and no global default bucket.
pub const PAYMENTS_CONFIG: &str = "\
version: 1
namespaces:
  payments:
    buckets:
      checkout:
        fill_rate: 200
";

/// Start the admin server over `config_text` with no console assets.
///
/// Returns the bound address; the accept loop runs until the test process
/// exits.
pub async fn start_server(config_text: &str) -> SocketAddr {
    start_server_with_assets(config_text, None).await
}

/// Start the admin server with an optional console assets directory.
pub async fn start_server_with_assets(
    config_text: &str,
    assets_dir: Option<PathBuf>,
) -> SocketAddr {
    init_tracing();

    let config =
        quotaserve_config::read_config(config_text.as_bytes()).expect("valid test configuration");
    let store = Arc::new(MemoryConfigStore::new(config));
    let service = AdminHttpService::new(store, AdminHttpConfig { assets_dir });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        loop {
            let Ok((stream, _peer)) = listener.accept().await else {
                break;
            };
            let svc = service.clone();
            tokio::spawn(async move {
                let _ = HttpConnBuilder::new(TokioExecutor::new())
                    .serve_connection(TokioIo::new(stream), svc)
                    .await;
            });
        }
    });

    addr
}

/// A client that does not follow redirects, so redirect responses can be
/// asserted directly.
#[must_use]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("build client")
}

/// Build a URL for `path` on the test server.
#[must_use]
pub fn url(addr: SocketAddr, path: &str) -> String {
    format!("http://{addr}{path}")
}
