//! Defaulting rules that make a parsed configuration total.
//!
//! A freshly parsed configuration may leave any numeric bucket field at
//! zero. The defaulting pass fills those fields, stamps every bucket's
//! resolved name and namespace back-reference, and validates structural
//! constraints. After the pass, every reachable bucket has all six numeric
//! fields populated; `max_idle_millis` uses -1 as its "unbounded" sentinel.
//! The pass is idempotent.

use crate::error::ConfigError;
use crate::model::{
    BucketConfig, DEFAULT_BUCKET_NAME, DYNAMIC_BUCKET_TEMPLATE_NAME, GLOBAL_NAMESPACE,
    NamespaceConfig, ServiceConfig,
};

/// Default bucket capacity.
pub const DEFAULT_SIZE: i64 = 100;

/// Default fill rate, tokens per unit time.
pub const DEFAULT_FILL_RATE: i64 = 50;

/// Default claim wait timeout.
pub const DEFAULT_WAIT_TIMEOUT_MILLIS: i64 = 1000;

/// Default maximum debt window.
pub const DEFAULT_MAX_DEBT_MILLIS: i64 = 10_000;

/// Sentinel meaning a bucket is never evicted for idleness.
pub const UNBOUNDED_IDLE_MILLIS: i64 = -1;

impl BucketConfig {
    /// Fill unset (zero-valued) numeric fields with their defaults.
    ///
    /// `max_tokens_per_request` follows `fill_rate` when unset, so it is
    /// resolved after `fill_rate`.
    pub fn apply_defaults(&mut self) {
        if self.size == 0 {
            self.size = DEFAULT_SIZE;
        }
        if self.fill_rate == 0 {
            self.fill_rate = DEFAULT_FILL_RATE;
        }
        if self.wait_timeout_millis == 0 {
            self.wait_timeout_millis = DEFAULT_WAIT_TIMEOUT_MILLIS;
        }
        if self.max_idle_millis == 0 {
            self.max_idle_millis = UNBOUNDED_IDLE_MILLIS;
        }
        if self.max_debt_millis == 0 {
            self.max_debt_millis = DEFAULT_MAX_DEBT_MILLIS;
        }
        if self.max_tokens_per_request == 0 {
            self.max_tokens_per_request = self.fill_rate;
        }
    }
}

/// Normalize a whole service configuration in place.
///
/// Validation runs before any mutation, so an error never leaves the graph
/// half-normalized.
pub fn apply_defaults(config: &mut ServiceConfig) -> Result<(), ConfigError> {
    for (name, namespace) in &config.namespaces {
        validate_namespace(name, namespace)?;
    }

    if let Some(bucket) = config.global_default_bucket.as_mut() {
        bucket.apply_defaults();
        bucket.name = DEFAULT_BUCKET_NAME.to_owned();
        bucket.namespace = GLOBAL_NAMESPACE.to_owned();
    }

    for (name, namespace) in &mut config.namespaces {
        default_namespace(name, namespace);
    }

    Ok(())
}

/// Normalize a single namespace in place, stamping `name` onto the
/// namespace and every bucket it contains.
///
/// Used both by [`apply_defaults`] and by stores that accept namespace
/// definitions at runtime.
pub fn apply_namespace_defaults(
    name: &str,
    namespace: &mut NamespaceConfig,
) -> Result<(), ConfigError> {
    validate_namespace(name, namespace)?;
    default_namespace(name, namespace);
    Ok(())
}

fn validate_namespace(name: &str, namespace: &NamespaceConfig) -> Result<(), ConfigError> {
    if namespace.default_bucket.is_some() && namespace.dynamic_bucket_template.is_some() {
        return Err(ConfigError::ConflictingBucketDefaults {
            namespace: name.to_owned(),
        });
    }
    Ok(())
}

fn default_namespace(name: &str, namespace: &mut NamespaceConfig) {
    namespace.name = name.to_owned();

    if let Some(bucket) = namespace.default_bucket.as_mut() {
        bucket.apply_defaults();
        bucket.name = DEFAULT_BUCKET_NAME.to_owned();
        bucket.namespace = name.to_owned();
    }

    if let Some(bucket) = namespace.dynamic_bucket_template.as_mut() {
        bucket.apply_defaults();
        bucket.name = DYNAMIC_BUCKET_TEMPLATE_NAME.to_owned();
        bucket.namespace = name.to_owned();
    }

    for (bucket_name, bucket) in &mut namespace.buckets {
        bucket.apply_defaults();
        bucket.name.clone_from(bucket_name);
        bucket.namespace = name.to_owned();
    }
}
