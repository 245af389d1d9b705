//! Admin HTTP service implementing the hyper `Service` trait.
//!
//! The service resolves a route, collects the request body, applies the
//! method semantics for the resolved address, and delegates to the
//! [`Administrable`] store. Decode failures short-circuit before the store
//! is touched; store failures are propagated to the caller.

use std::convert::Infallible;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;

use bytes::Bytes;
use http_body_util::BodyExt;
use hyper::body::Incoming;

use quotaserve_config::{BucketConfig, GLOBAL_NAMESPACE, NamespaceConfig};

use crate::body::AdminResponseBody;
use crate::dispatch::Administrable;
use crate::error::AdminError;
use crate::response::{
    empty_response, error_to_response, html_response, json_response, not_found,
    redirect_permanent,
};
use crate::router::{AdminRoute, resolve_route};
use crate::ui;

/// Configuration for the admin HTTP service.
#[derive(Debug, Clone, Default)]
pub struct AdminHttpConfig {
    /// Directory holding console templates. When absent, no console is
    /// served and only the REST surface under `/api/` is available.
    pub assets_dir: Option<PathBuf>,
}

/// Hyper `Service` serving the admin API and console for an
/// [`Administrable`] store.
#[derive(Debug)]
pub struct AdminHttpService<A: Administrable> {
    store: Arc<A>,
    config: Arc<AdminHttpConfig>,
}

impl<A: Administrable> AdminHttpService<A> {
    /// Create a new `AdminHttpService` over `store`.
    pub fn new(store: Arc<A>, config: AdminHttpConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}

impl<A: Administrable> Clone for AdminHttpService<A> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            config: Arc::clone(&self.config),
        }
    }
}

impl<A: Administrable> hyper::service::Service<http::Request<Incoming>> for AdminHttpService<A> {
    type Response = http::Response<AdminResponseBody>;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, req: http::Request<Incoming>) -> Self::Future {
        let store = Arc::clone(&self.store);
        let config = Arc::clone(&self.config);
        let request_id = uuid::Uuid::new_v4().to_string();

        Box::pin(async move {
            let response = match process_request(req, store.as_ref(), &config).await {
                Ok(response) => response,
                Err(err) => {
                    tracing::warn!(error = %err, "admin request failed");
                    error_to_response(&err)
                }
            };
            Ok(add_common_headers(response, &request_id))
        })
    }
}

/// Process a single admin request through the full pipeline.
async fn process_request<A: Administrable>(
    req: http::Request<Incoming>,
    store: &A,
    config: &AdminHttpConfig,
) -> Result<http::Response<AdminResponseBody>, AdminError> {
    let (parts, incoming) = req.into_parts();
    let path = parts.uri.path().to_owned();

    tracing::debug!(method = %parts.method, path = %path, "dispatching admin request");

    match resolve_route(&path) {
        AdminRoute::RootRedirect => Ok(redirect_permanent("/admin/")),
        AdminRoute::Console { page } => handle_console(store, config, &page),
        AdminRoute::Namespace { name } => {
            let body = collect_body(incoming).await?;
            handle_namespace(store, &parts.method, &name, &body)
        }
        AdminRoute::Bucket { namespace, bucket } => {
            let body = collect_body(incoming).await?;
            handle_bucket(store, &parts.method, &namespace, &bucket, &body)
        }
        AdminRoute::Unknown => Ok(not_found()),
    }
}

/// Method semantics for a bucket address.
fn handle_bucket<A: Administrable>(
    store: &A,
    method: &http::Method,
    namespace: &str,
    bucket: &str,
    body: &[u8],
) -> Result<http::Response<AdminResponseBody>, AdminError> {
    match method.as_str() {
        "GET" => read_configs(store, namespace),
        "PUT" => {
            let definition = decode_bucket(body, bucket)?;
            store.add_bucket(namespace, definition)?;
            Ok(empty_response())
        }
        "POST" => {
            let definition = decode_bucket(body, bucket)?;
            store.update_bucket(namespace, definition)?;
            Ok(empty_response())
        }
        "DELETE" => {
            store.delete_bucket(namespace, bucket)?;
            Ok(empty_response())
        }
        _ => Ok(not_found()),
    }
}

/// Method semantics for a namespace address. GET is not defined here.
fn handle_namespace<A: Administrable>(
    store: &A,
    method: &http::Method,
    name: &str,
    body: &[u8],
) -> Result<http::Response<AdminResponseBody>, AdminError> {
    match method.as_str() {
        "PUT" => {
            let definition = decode_namespace(body, name)?;
            store.add_namespace(definition)?;
            Ok(empty_response())
        }
        "POST" => {
            let definition = decode_namespace(body, name)?;
            store.update_namespace(definition)?;
            Ok(empty_response())
        }
        "DELETE" => {
            store.delete_namespace(name)?;
            Ok(empty_response())
        }
        _ => Ok(not_found()),
    }
}

/// GET over a bucket address reads configuration: the whole service config
/// for the global (or empty) namespace, otherwise the addressed namespace.
fn read_configs<A: Administrable>(
    store: &A,
    namespace: &str,
) -> Result<http::Response<AdminResponseBody>, AdminError> {
    let configs = store.configs();

    if namespace.is_empty() || namespace == GLOBAL_NAMESPACE {
        let json =
            quotaserve_config::to_json(&configs).map_err(|e| AdminError::Encode(e.to_string()))?;
        return Ok(json_response(json));
    }

    let ns = configs
        .namespaces
        .get(namespace)
        .ok_or_else(|| AdminError::NamespaceNotFound(namespace.to_owned()))?;
    let json =
        quotaserve_config::namespace_to_json(ns).map_err(|e| AdminError::Encode(e.to_string()))?;
    Ok(json_response(json))
}

/// Console page rendering; absent without a configured assets directory.
fn handle_console<A: Administrable>(
    store: &A,
    config: &AdminHttpConfig,
    page: &str,
) -> Result<http::Response<AdminResponseBody>, AdminError> {
    let Some(assets_dir) = config.assets_dir.as_ref() else {
        return Ok(not_found());
    };
    let html = ui::render_console(assets_dir, page, &store.configs())?;
    Ok(html_response(html))
}

/// Decode a bucket definition from a JSON body. The resolved address wins
/// over any name carried in the body.
fn decode_bucket(body: &[u8], resolved_name: &str) -> Result<BucketConfig, AdminError> {
    let mut bucket = quotaserve_config::bucket_from_json(body)
        .map_err(|e| AdminError::BadContent(e.to_string()))?;
    bucket.name = resolved_name.to_owned();
    Ok(bucket)
}

/// Decode a namespace definition from a JSON body. The resolved address
/// wins over any name carried in the body.
fn decode_namespace(body: &[u8], resolved_name: &str) -> Result<NamespaceConfig, AdminError> {
    let mut namespace = quotaserve_config::namespace_from_json(body)
        .map_err(|e| AdminError::BadContent(e.to_string()))?;
    namespace.name = resolved_name.to_owned();
    Ok(namespace)
}

/// Collect the incoming body into a single `Bytes` buffer.
async fn collect_body(incoming: Incoming) -> Result<Bytes, AdminError> {
    incoming
        .collect()
        .await
        .map(http_body_util::Collected::to_bytes)
        .map_err(|e| AdminError::BadContent(format!("failed to read request body: {e}")))
}

/// Add common response headers to every admin response.
fn add_common_headers(
    mut response: http::Response<AdminResponseBody>,
    request_id: &str,
) -> http::Response<AdminResponseBody> {
    let headers = response.headers_mut();

    if let Ok(hv) = http::HeaderValue::from_str(request_id) {
        headers.entry("x-request-id").or_insert(hv);
    }

    headers.insert("server", http::HeaderValue::from_static("quotaserve"));

    response
}
