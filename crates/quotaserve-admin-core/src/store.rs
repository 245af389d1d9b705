//! The in-memory `Administrable` store.

use parking_lot::RwLock;

use quotaserve_admin_http::{Administrable, StoreError};
use quotaserve_config::{
    BucketConfig, DEFAULT_BUCKET_NAME, DYNAMIC_BUCKET_TEMPLATE_NAME, GLOBAL_NAMESPACE,
    NamespaceConfig, ServiceConfig, apply_namespace_defaults, fully_qualified_name,
};

/// In-memory configuration store.
///
/// The whole graph sits behind one reader-writer lock: reads take the read
/// lock and clone an atomic snapshot, mutations take the write lock, so a
/// concurrent reader never observes a namespace or bucket in a half-written
/// state. Every successful mutation bumps the configuration version.
#[derive(Debug)]
pub struct MemoryConfigStore {
    config: RwLock<ServiceConfig>,
}

impl MemoryConfigStore {
    /// Create a store owning an already-defaulted configuration.
    #[must_use]
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            config: RwLock::new(config),
        }
    }

    /// Replace the entire configuration wholesale.
    ///
    /// Used for configuration reloads: the caller builds and defaults a
    /// brand-new graph, and this swap is atomic — there is no partial merge.
    pub fn reload(&self, config: ServiceConfig) {
        tracing::info!(version = config.version, "reloading configuration");
        *self.config.write() = config;
    }
}

impl Administrable for MemoryConfigStore {
    fn configs(&self) -> ServiceConfig {
        self.config.read().clone()
    }

    fn add_bucket(&self, namespace: &str, mut bucket: BucketConfig) -> Result<(), StoreError> {
        // Incoming definitions are defaulted before storage, so partial
        // bodies come out with fully-populated fields on the next read.
        bucket.apply_defaults();

        tracing::debug!(fqn = %fully_qualified_name(namespace, &bucket.name), "adding bucket");

        let mut config = self.config.write();

        if namespace == GLOBAL_NAMESPACE {
            bucket.name = DEFAULT_BUCKET_NAME.to_owned();
            bucket.namespace = GLOBAL_NAMESPACE.to_owned();
            config.global_default_bucket = Some(bucket);
            config.version += 1;
            return Ok(());
        }

        let ns = config
            .namespaces
            .get_mut(namespace)
            .ok_or_else(|| StoreError::NamespaceNotFound(namespace.to_owned()))?;
        bucket.namespace = namespace.to_owned();

        let bucket_name = bucket.name.clone();
        match bucket_name.as_str() {
            DEFAULT_BUCKET_NAME => {
                if ns.dynamic_bucket_template.is_some() {
                    return Err(StoreError::Conflict(format!(
                        "namespace {namespace} already has a dynamic bucket template"
                    )));
                }
                ns.default_bucket = Some(bucket);
            }
            DYNAMIC_BUCKET_TEMPLATE_NAME => {
                if ns.default_bucket.is_some() {
                    return Err(StoreError::Conflict(format!(
                        "namespace {namespace} already has a default bucket"
                    )));
                }
                ns.dynamic_bucket_template = Some(bucket);
            }
            _ => {
                ns.buckets.insert(bucket_name.clone(), bucket);
            }
        }

        config.version += 1;
        Ok(())
    }

    fn update_bucket(&self, namespace: &str, mut bucket: BucketConfig) -> Result<(), StoreError> {
        bucket.apply_defaults();

        let fqn = fully_qualified_name(namespace, &bucket.name);
        tracing::debug!(fqn = %fqn, "updating bucket");

        let mut config = self.config.write();

        if namespace == GLOBAL_NAMESPACE {
            if config.global_default_bucket.is_none() {
                return Err(StoreError::BucketNotFound(fqn));
            }
            bucket.name = DEFAULT_BUCKET_NAME.to_owned();
            bucket.namespace = GLOBAL_NAMESPACE.to_owned();
            config.global_default_bucket = Some(bucket);
            config.version += 1;
            return Ok(());
        }

        let ns = config
            .namespaces
            .get_mut(namespace)
            .ok_or_else(|| StoreError::NamespaceNotFound(namespace.to_owned()))?;
        bucket.namespace = namespace.to_owned();

        let bucket_name = bucket.name.clone();
        match bucket_name.as_str() {
            DEFAULT_BUCKET_NAME => {
                if ns.default_bucket.is_none() {
                    return Err(StoreError::BucketNotFound(fqn));
                }
                ns.default_bucket = Some(bucket);
            }
            DYNAMIC_BUCKET_TEMPLATE_NAME => {
                if ns.dynamic_bucket_template.is_none() {
                    return Err(StoreError::BucketNotFound(fqn));
                }
                ns.dynamic_bucket_template = Some(bucket);
            }
            name => {
                if !ns.buckets.contains_key(name) {
                    return Err(StoreError::BucketNotFound(fqn));
                }
                ns.buckets.insert(bucket_name.clone(), bucket);
            }
        }

        config.version += 1;
        Ok(())
    }

    fn delete_bucket(&self, namespace: &str, bucket: &str) -> Result<(), StoreError> {
        let fqn = fully_qualified_name(namespace, bucket);
        tracing::debug!(fqn = %fqn, "deleting bucket");

        let mut config = self.config.write();

        if namespace == GLOBAL_NAMESPACE {
            if config.global_default_bucket.take().is_none() {
                return Err(StoreError::BucketNotFound(fqn));
            }
            config.version += 1;
            return Ok(());
        }

        let ns = config
            .namespaces
            .get_mut(namespace)
            .ok_or_else(|| StoreError::NamespaceNotFound(namespace.to_owned()))?;

        let removed = match bucket {
            DEFAULT_BUCKET_NAME => ns.default_bucket.take().is_some(),
            DYNAMIC_BUCKET_TEMPLATE_NAME => ns.dynamic_bucket_template.take().is_some(),
            name => ns.buckets.remove(name).is_some(),
        };

        if !removed {
            return Err(StoreError::BucketNotFound(fqn));
        }

        config.version += 1;
        Ok(())
    }

    fn add_namespace(&self, mut namespace: NamespaceConfig) -> Result<(), StoreError> {
        let name = namespace.name.clone();
        tracing::debug!(namespace = %name, "adding namespace");

        apply_namespace_defaults(&name, &mut namespace)
            .map_err(|e| StoreError::Conflict(e.to_string()))?;

        let mut config = self.config.write();
        config.namespaces.insert(name, namespace);
        config.version += 1;
        Ok(())
    }

    fn update_namespace(&self, mut namespace: NamespaceConfig) -> Result<(), StoreError> {
        let name = namespace.name.clone();
        tracing::debug!(namespace = %name, "updating namespace");

        apply_namespace_defaults(&name, &mut namespace)
            .map_err(|e| StoreError::Conflict(e.to_string()))?;

        let mut config = self.config.write();
        if !config.namespaces.contains_key(&name) {
            return Err(StoreError::NamespaceNotFound(name));
        }
        config.namespaces.insert(name, namespace);
        config.version += 1;
        Ok(())
    }

    fn delete_namespace(&self, name: &str) -> Result<(), StoreError> {
        tracing::debug!(namespace = %name, "deleting namespace");

        let mut config = self.config.write();
        if config.namespaces.remove(name).is_none() {
            return Err(StoreError::NamespaceNotFound(name.to_owned()));
        }
        config.version += 1;
        Ok(())
    }
}
