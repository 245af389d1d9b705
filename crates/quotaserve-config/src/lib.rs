//! Configuration model for quotaserve.
//!
//! This crate owns the service → namespace → bucket entity graph, the
//! defaulting rules that make a parsed configuration total, and the codecs
//! that move a configuration between its in-memory form, a compact binary
//! wire form (CBOR), a human-editable YAML form, and the JSON form used by
//! the admin API.
//!
//! A configuration is constructed once from bytes via [`read_config`],
//! normalized by [`apply_defaults`], and then owned by a store. Reloading
//! builds a brand-new graph and replaces the old one wholesale.

pub mod codec;
pub mod defaults;
pub mod error;
pub mod model;
pub mod wire;

pub use codec::{
    bucket_from_json, from_json, from_wire_bytes, namespace_from_json, namespace_to_json,
    read_config, to_json, to_text, to_wire_bytes,
};
pub use defaults::{apply_defaults, apply_namespace_defaults};
pub use error::ConfigError;
pub use model::{
    BucketConfig, DEFAULT_BUCKET_NAME, DYNAMIC_BUCKET_TEMPLATE_NAME, GLOBAL_NAMESPACE,
    NamespaceConfig, ServiceConfig, fully_qualified_name,
};
