//! Admin request routing.
//!
//! Resource addresses are parsed from the request path. The namespace
//! surface (`/api/namespace/...`) is resolved before the generic `/api/`
//! prefix, and a bucket address is the path remainder split on `/`:
//!
//! | segments | resolved address |
//! |----------|------------------|
//! | 0        | (global sentinel, default sentinel) |
//! | 1        | (segment 0, default sentinel) |
//! | ≥2       | (segment 0, segment 1); extra segments are ignored |

use quotaserve_config::{DEFAULT_BUCKET_NAME, GLOBAL_NAMESPACE};

/// Prefix for the bucket-addressed REST surface.
pub const API_PREFIX: &str = "/api";

/// Prefix addressing whole namespaces.
pub const API_NAMESPACE_PREFIX: &str = "/api/namespace/";

/// Prefix for the HTML console.
pub const ADMIN_PREFIX: &str = "/admin";

/// A resolved admin route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminRoute {
    /// Bucket CRUD at (namespace, bucket).
    Bucket {
        /// Resolved namespace name (possibly the global sentinel).
        namespace: String,
        /// Resolved bucket name (possibly the default sentinel).
        bucket: String,
    },
    /// Namespace CRUD.
    Namespace {
        /// The addressed namespace.
        name: String,
    },
    /// HTML console page (empty string means the index page).
    Console {
        /// Requested page name.
        page: String,
    },
    /// `/` redirects permanently to the console.
    RootRedirect,
    /// No route matched.
    Unknown,
}

/// Resolve a request path into an [`AdminRoute`].
#[must_use]
pub fn resolve_route(path: &str) -> AdminRoute {
    if let Some(name) = path.strip_prefix(API_NAMESPACE_PREFIX) {
        return AdminRoute::Namespace {
            name: name.trim_matches('/').to_owned(),
        };
    }

    if path == API_PREFIX || path.starts_with("/api/") {
        let params = path.strip_prefix(API_PREFIX).unwrap_or("");
        let (namespace, bucket) = resolve_bucket_address(params);
        return AdminRoute::Bucket { namespace, bucket };
    }

    if path == "/" {
        return AdminRoute::RootRedirect;
    }

    if path == ADMIN_PREFIX || path.starts_with("/admin/") {
        let page = path
            .strip_prefix(ADMIN_PREFIX)
            .unwrap_or("")
            .trim_matches('/');
        return AdminRoute::Console {
            page: page.to_owned(),
        };
    }

    AdminRoute::Unknown
}

/// Resolve the `/api/` path remainder into a (namespace, bucket) address.
///
/// Empty segments are discarded, so `""`, `"/"` and trailing slashes all
/// resolve through the same table. Segments beyond the second are ignored.
#[must_use]
pub fn resolve_bucket_address(params: &str) -> (String, String) {
    let segments: Vec<&str> = params.split('/').filter(|s| !s.is_empty()).collect();
    match segments.as_slice() {
        [] => (GLOBAL_NAMESPACE.to_owned(), DEFAULT_BUCKET_NAME.to_owned()),
        [namespace] => ((*namespace).to_owned(), DEFAULT_BUCKET_NAME.to_owned()),
        [namespace, bucket, ..] => ((*namespace).to_owned(), (*bucket).to_owned()),
    }
}
