//! The store capability consumed by the admin dispatcher.

use quotaserve_config::{BucketConfig, NamespaceConfig, ServiceConfig};

/// Errors returned by an [`Administrable`] store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The addressed namespace does not exist.
    #[error("namespace not found: {0}")]
    NamespaceNotFound(String),

    /// The addressed bucket does not exist.
    #[error("bucket not found: {0}")]
    BucketNotFound(String),

    /// The mutation would violate a structural invariant, such as giving a
    /// namespace both a default bucket and a dynamic template.
    #[error("conflicting configuration: {0}")]
    Conflict(String),

    /// The store failed internally.
    #[error("storage failure: {0}")]
    Internal(String),
}

/// Something that can be administered through the admin API.
///
/// Implementations own all shared mutable configuration state and must be
/// safe to call concurrently: every method is atomic with respect to the
/// others, and [`configs`](Administrable::configs) returns a snapshot that
/// never observes a half-applied mutation.
pub trait Administrable: Send + Sync + 'static {
    /// A consistent snapshot of the current configuration.
    fn configs(&self) -> ServiceConfig;

    /// Add or replace a bucket within `namespace`. The bucket's resolved
    /// name is already stamped; sentinel names address the namespace's
    /// default bucket or dynamic template, and the global sentinel
    /// namespace addresses the service-wide default bucket.
    fn add_bucket(&self, namespace: &str, bucket: BucketConfig) -> Result<(), StoreError>;

    /// Update an existing bucket within `namespace`.
    fn update_bucket(&self, namespace: &str, bucket: BucketConfig) -> Result<(), StoreError>;

    /// Remove the named bucket from `namespace`.
    fn delete_bucket(&self, namespace: &str, bucket: &str) -> Result<(), StoreError>;

    /// Add or replace a whole namespace. The namespace's name is already
    /// stamped from the resolved address.
    fn add_namespace(&self, namespace: NamespaceConfig) -> Result<(), StoreError>;

    /// Update an existing namespace.
    fn update_namespace(&self, namespace: NamespaceConfig) -> Result<(), StoreError>;

    /// Remove the named namespace and everything it contains.
    fn delete_namespace(&self, name: &str) -> Result<(), StoreError>;
}
