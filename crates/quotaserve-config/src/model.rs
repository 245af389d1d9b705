//! The configuration entity graph: service → namespaces → buckets.
//!
//! Identity rules: namespace names are unique within a [`ServiceConfig`]
//! and bucket names are unique within a [`NamespaceConfig`]; both are
//! enforced structurally by keying the collections on the name. Default
//! buckets, dynamic bucket templates, and the global namespace are
//! addressed through reserved sentinel names that are never valid as
//! user-assigned keys.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Sentinel namespace name addressing the service-wide default bucket.
pub const GLOBAL_NAMESPACE: &str = "___GLOBAL___";

/// Sentinel bucket name for a namespace's (or the global) default bucket.
pub const DEFAULT_BUCKET_NAME: &str = "___DEFAULT_BUCKET___";

/// Sentinel bucket name for a namespace's dynamic bucket template.
pub const DYNAMIC_BUCKET_TEMPLATE_NAME: &str = "___DYNAMIC_BUCKET_TPL___";

/// Compute the fully-qualified name of a bucket.
///
/// This is a pure function of the owning namespace's name and the bucket's
/// resolved name; sentinel names stand in for the global namespace and
/// default/template buckets.
#[must_use]
pub fn fully_qualified_name(namespace: &str, bucket: &str) -> String {
    format!("{namespace}:{bucket}")
}

/// Root of the configuration graph.
///
/// Owns all namespaces exclusively. `version` is assigned monotonically by
/// the store on each successful mutation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Service-wide default bucket, applied when a namespace has no
    /// configuration of its own. May be absent entirely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_default_bucket: Option<BucketConfig>,

    /// Namespaces keyed by name.
    #[serde(default)]
    pub namespaces: BTreeMap<String, NamespaceConfig>,

    /// Monotonically-assigned configuration version.
    #[serde(default)]
    pub version: i32,
}

impl ServiceConfig {
    /// Create an empty configuration with no global default bucket.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration with a fully-populated global default bucket.
    #[must_use]
    pub fn with_default_bucket() -> Self {
        Self {
            global_default_bucket: Some(BucketConfig::with_defaults()),
            ..Self::default()
        }
    }

    /// Insert a namespace under `name`, stamping the namespace's own name
    /// and the back-reference of every bucket it contains.
    pub fn add_namespace(&mut self, name: impl Into<String>, mut namespace: NamespaceConfig) -> &mut Self {
        let name = name.into();
        namespace.name.clone_from(&name);
        for (bucket_name, bucket) in &mut namespace.buckets {
            bucket.name.clone_from(bucket_name);
            bucket.namespace.clone_from(&name);
        }
        self.namespaces.insert(name, namespace);
        self
    }

    /// Names of all configured namespaces.
    #[must_use]
    pub fn namespace_names(&self) -> Vec<String> {
        self.namespaces.keys().cloned().collect()
    }
}

/// A namespace groups buckets and carries per-namespace defaulting rules.
///
/// A namespace may have *either* a default bucket *or* a dynamic bucket
/// template, never both; the defaulting pass rejects the combination.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NamespaceConfig {
    /// Resolved name, equal to the key in the owning map. Never serialized;
    /// stamped during defaulting or decode.
    #[serde(skip)]
    pub name: String,

    /// Default bucket for requests that match no explicit bucket.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_bucket: Option<BucketConfig>,

    /// Prototype definition used to spawn per-key buckets at runtime.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dynamic_bucket_template: Option<BucketConfig>,

    /// Upper bound on dynamically created buckets. Zero means unlimited.
    #[serde(default)]
    pub max_dynamic_buckets: i32,

    /// Explicitly configured buckets keyed by name.
    #[serde(default)]
    pub buckets: BTreeMap<String, BucketConfig>,
}

impl NamespaceConfig {
    /// Create an empty namespace.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a bucket under `name`, stamping its resolved name and
    /// back-reference.
    pub fn add_bucket(&mut self, name: impl Into<String>, mut bucket: BucketConfig) -> &mut Self {
        let name = name.into();
        bucket.name.clone_from(&name);
        bucket.namespace.clone_from(&self.name);
        self.buckets.insert(name, bucket);
        self
    }

    /// Set the dynamic bucket template, stamping its sentinel name.
    pub fn set_dynamic_bucket_template(&mut self, mut bucket: BucketConfig) -> &mut Self {
        bucket.name = DYNAMIC_BUCKET_TEMPLATE_NAME.to_owned();
        bucket.namespace.clone_from(&self.name);
        self.dynamic_bucket_template = Some(bucket);
        self
    }
}

/// A single token bucket definition.
///
/// `namespace` holds the *name* of the owning namespace — a lookup key used
/// only to compute the fully-qualified name, never an ownership edge, and
/// never serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketConfig {
    /// Resolved bucket name (map key or sentinel). Stamped during
    /// defaulting or decode; never serialized.
    #[serde(skip)]
    pub name: String,

    /// Name of the owning namespace. Empty for a bucket that has not been
    /// attached yet; the global default bucket carries [`GLOBAL_NAMESPACE`].
    #[serde(skip)]
    pub namespace: String,

    /// Bucket capacity in tokens.
    #[serde(default)]
    pub size: i64,

    /// Fill rate in tokens per unit time.
    #[serde(default)]
    pub fill_rate: i64,

    /// How long a claim may wait for tokens before being rejected.
    #[serde(default)]
    pub wait_timeout_millis: i64,

    /// Idle time after which the bucket is eligible for eviction.
    /// Negative means never evict.
    #[serde(default)]
    pub max_idle_millis: i64,

    /// How far the bucket may go into debt before rejecting claims.
    #[serde(default)]
    pub max_debt_millis: i64,

    /// Maximum tokens claimable in a single request.
    #[serde(default)]
    pub max_tokens_per_request: i64,
}

impl BucketConfig {
    /// Create a bucket with every numeric field at its documented default.
    ///
    /// `max_tokens_per_request` is left unset here; it follows `fill_rate`
    /// when defaults are applied.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            size: 100,
            fill_rate: 50,
            wait_timeout_millis: 1000,
            max_idle_millis: -1,
            max_debt_millis: 10_000,
            ..Self::default()
        }
    }

    /// Fully-qualified name of this bucket.
    ///
    /// A bucket without a namespace back-reference is the global default.
    #[must_use]
    pub fn fqn(&self) -> String {
        if self.namespace.is_empty() {
            return fully_qualified_name(GLOBAL_NAMESPACE, DEFAULT_BUCKET_NAME);
        }
        fully_qualified_name(&self.namespace, &self.name)
    }
}
