//! Wire-shaped configuration messages.
//!
//! The wire form mirrors the binary message layout: name-keyed maps become
//! repeated sequences that carry the entry name, and the bucket→namespace
//! back-reference is dropped entirely (it is reconstructed on decode).
//! Field names are lower-snake-case in every encoding derived from these
//! structs (CBOR and JSON alike).
//!
//! Because map iteration order is not semantically meaningful, two wire
//! messages are compared only after [`WireServiceConfig::canonicalize`]
//! sorts the repeated sequences by name. Never rely on the emitted
//! sequence order being reproducible.

use serde::{Deserialize, Serialize};

use crate::model::{
    BucketConfig, DEFAULT_BUCKET_NAME, DYNAMIC_BUCKET_TEMPLATE_NAME, NamespaceConfig,
    ServiceConfig,
};

/// Wire form of a bucket definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireBucketConfig {
    /// Bucket name (map key or sentinel).
    #[serde(default)]
    pub name: String,
    /// Bucket capacity in tokens.
    #[serde(default)]
    pub size: i64,
    /// Fill rate in tokens per unit time.
    #[serde(default)]
    pub fill_rate: i64,
    /// Claim wait timeout.
    #[serde(default)]
    pub wait_timeout_millis: i64,
    /// Idle eviction horizon; negative means never evict.
    #[serde(default)]
    pub max_idle_millis: i64,
    /// Maximum debt window.
    #[serde(default)]
    pub max_debt_millis: i64,
    /// Maximum tokens claimable per request.
    #[serde(default)]
    pub max_tokens_per_request: i64,
}

/// Wire form of a namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireNamespaceConfig {
    /// Namespace name.
    #[serde(default)]
    pub name: String,
    /// Default bucket, if configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_bucket: Option<WireBucketConfig>,
    /// Dynamic bucket template, if configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dynamic_bucket_template: Option<WireBucketConfig>,
    /// Upper bound on dynamically created buckets.
    #[serde(default)]
    pub max_dynamic_buckets: i32,
    /// Explicit buckets as a repeated sequence.
    #[serde(default)]
    pub buckets: Vec<WireBucketConfig>,
}

/// Wire form of the whole service configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireServiceConfig {
    /// Global default bucket, if configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_default_bucket: Option<WireBucketConfig>,
    /// Namespaces as a repeated sequence.
    #[serde(default)]
    pub namespaces: Vec<WireNamespaceConfig>,
    /// Configuration version.
    #[serde(default)]
    pub version: i32,
}

impl WireServiceConfig {
    /// Sort the repeated sequences by name so that two messages built from
    /// equal models compare equal regardless of emission order.
    pub fn canonicalize(&mut self) {
        self.namespaces.sort_by(|a, b| a.name.cmp(&b.name));
        for namespace in &mut self.namespaces {
            namespace.buckets.sort_by(|a, b| a.name.cmp(&b.name));
        }
    }
}

impl WireBucketConfig {
    /// Build the wire form of a bucket under `name`.
    #[must_use]
    pub fn from_model(name: &str, bucket: &BucketConfig) -> Self {
        Self {
            name: name.to_owned(),
            size: bucket.size,
            fill_rate: bucket.fill_rate,
            wait_timeout_millis: bucket.wait_timeout_millis,
            max_idle_millis: bucket.max_idle_millis,
            max_debt_millis: bucket.max_debt_millis,
            max_tokens_per_request: bucket.max_tokens_per_request,
        }
    }

    /// Rebuild the model bucket, reattaching it to `namespace`.
    #[must_use]
    pub fn into_model(self, namespace: &str) -> BucketConfig {
        BucketConfig {
            name: self.name,
            namespace: namespace.to_owned(),
            size: self.size,
            fill_rate: self.fill_rate,
            wait_timeout_millis: self.wait_timeout_millis,
            max_idle_millis: self.max_idle_millis,
            max_debt_millis: self.max_debt_millis,
            max_tokens_per_request: self.max_tokens_per_request,
        }
    }
}

impl WireNamespaceConfig {
    /// Build the wire form of a namespace.
    #[must_use]
    pub fn from_model(namespace: &NamespaceConfig) -> Self {
        Self {
            name: namespace.name.clone(),
            default_bucket: namespace
                .default_bucket
                .as_ref()
                .map(|b| WireBucketConfig::from_model(DEFAULT_BUCKET_NAME, b)),
            dynamic_bucket_template: namespace
                .dynamic_bucket_template
                .as_ref()
                .map(|b| WireBucketConfig::from_model(DYNAMIC_BUCKET_TEMPLATE_NAME, b)),
            max_dynamic_buckets: namespace.max_dynamic_buckets,
            buckets: namespace
                .buckets
                .iter()
                .map(|(name, bucket)| WireBucketConfig::from_model(name, bucket))
                .collect(),
        }
    }

    /// Rebuild the model namespace, reconstructing every bucket's
    /// back-reference from this message's name.
    #[must_use]
    pub fn into_model(self) -> NamespaceConfig {
        let name = self.name;
        NamespaceConfig {
            default_bucket: self.default_bucket.map(|b| b.into_model(&name)),
            dynamic_bucket_template: self.dynamic_bucket_template.map(|b| b.into_model(&name)),
            max_dynamic_buckets: self.max_dynamic_buckets,
            buckets: self
                .buckets
                .into_iter()
                .map(|b| {
                    let bucket = b.into_model(&name);
                    (bucket.name.clone(), bucket)
                })
                .collect(),
            name,
        }
    }
}

impl ServiceConfig {
    /// Convert to the wire form.
    #[must_use]
    pub fn to_wire(&self) -> WireServiceConfig {
        WireServiceConfig {
            global_default_bucket: self
                .global_default_bucket
                .as_ref()
                .map(|b| WireBucketConfig::from_model(DEFAULT_BUCKET_NAME, b)),
            namespaces: self.namespaces.values().map(WireNamespaceConfig::from_model).collect(),
            version: self.version,
        }
    }

    /// Rebuild the model from a wire message.
    #[must_use]
    pub fn from_wire(wire: WireServiceConfig) -> Self {
        Self {
            global_default_bucket: wire
                .global_default_bucket
                .map(|b| b.into_model(crate::model::GLOBAL_NAMESPACE)),
            namespaces: wire
                .namespaces
                .into_iter()
                .map(|ns| {
                    let namespace = ns.into_model();
                    (namespace.name.clone(), namespace)
                })
                .collect(),
            version: wire.version,
        }
    }

    /// Structural equality: field-by-field over the canonical wire form,
    /// with set semantics on the mapping-derived sequences.
    #[must_use]
    pub fn structurally_equal(&self, other: &Self) -> bool {
        let mut left = self.to_wire();
        let mut right = other.to_wire();
        left.canonicalize();
        right.canonicalize();
        left == right
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::apply_defaults;

    fn defaulted_config() -> ServiceConfig {
        let mut namespace = NamespaceConfig::new();
        namespace.buckets.insert(
            "checkout".to_owned(),
            BucketConfig {
                fill_rate: 200,
                ..BucketConfig::default()
            },
        );
        namespace.buckets.insert("refunds".to_owned(), BucketConfig::default());

        let mut config = ServiceConfig::with_default_bucket();
        config.namespaces.insert("payments".to_owned(), namespace);
        config.version = 3;
        apply_defaults(&mut config).expect("defaults");
        config
    }

    #[test]
    fn test_should_round_trip_through_wire_form() {
        let config = defaulted_config();
        let rebuilt = ServiceConfig::from_wire(config.to_wire());
        assert!(config.structurally_equal(&rebuilt));
        assert_eq!(rebuilt.version, 3);
    }

    #[test]
    fn test_should_reconstruct_back_references() {
        let config = defaulted_config();
        let rebuilt = ServiceConfig::from_wire(config.to_wire());

        let bucket = &rebuilt.namespaces["payments"].buckets["checkout"];
        assert_eq!(bucket.namespace, "payments");
        assert_eq!(bucket.fqn(), "payments:checkout");
    }

    #[test]
    fn test_should_compare_independent_of_sequence_order() {
        let config = defaulted_config();
        let mut shuffled = config.to_wire();
        shuffled.namespaces.reverse();
        for namespace in &mut shuffled.namespaces {
            namespace.buckets.reverse();
        }
        let rebuilt = ServiceConfig::from_wire(shuffled);
        assert!(config.structurally_equal(&rebuilt));
    }

    #[test]
    fn test_should_detect_field_differences() {
        let config = defaulted_config();
        let mut other = config.clone();
        other
            .namespaces
            .get_mut("payments")
            .expect("namespace")
            .buckets
            .get_mut("checkout")
            .expect("bucket")
            .fill_rate = 201;
        assert!(!config.structurally_equal(&other));
    }

    #[test]
    fn test_should_use_sentinel_names_on_the_wire() {
        let config = defaulted_config();
        let wire = config.to_wire();
        assert_eq!(
            wire.global_default_bucket.expect("global bucket").name,
            DEFAULT_BUCKET_NAME
        );
    }
}
