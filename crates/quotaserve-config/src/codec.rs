//! Codecs bridging the in-memory model with its serialized forms.
//!
//! Three encodings share the wire message shape from [`crate::wire`]:
//!
//! - **binary** — CBOR, the compact form used for config snapshots;
//! - **JSON** — the admin API body format;
//! - **text** — YAML keyed by name, intended for human editing.
//!
//! The text form parses directly into the model and is defaulted before it
//! is returned; the binary and JSON forms go through the wire structs and
//! reconstruct bucket back-references on decode.

use crate::defaults::apply_defaults;
use crate::error::ConfigError;
use crate::model::{BucketConfig, NamespaceConfig, ServiceConfig};
use crate::wire::{WireBucketConfig, WireNamespaceConfig, WireServiceConfig};

/// Encode a configuration into the binary wire form.
pub fn to_wire_bytes(config: &ServiceConfig) -> Result<Vec<u8>, ConfigError> {
    let mut buf = Vec::new();
    ciborium::ser::into_writer(&config.to_wire(), &mut buf)
        .map_err(|e| ConfigError::WireEncode(e.to_string()))?;
    Ok(buf)
}

/// Decode a configuration from the binary wire form.
pub fn from_wire_bytes(bytes: &[u8]) -> Result<ServiceConfig, ConfigError> {
    let wire: WireServiceConfig =
        ciborium::de::from_reader(bytes).map_err(|e| ConfigError::WireDecode(e.to_string()))?;
    Ok(ServiceConfig::from_wire(wire))
}

/// Parse the human-editable text form and apply defaults.
///
/// The global default bucket may be entirely absent from the text; any
/// numeric bucket field left out is filled by the defaulting pass. A
/// structurally invalid document (for example a namespace with both a
/// default bucket and a dynamic template) rejects the whole load.
pub fn read_config(bytes: &[u8]) -> Result<ServiceConfig, ConfigError> {
    let mut config: ServiceConfig = serde_yaml::from_slice(bytes)?;
    apply_defaults(&mut config)?;
    Ok(config)
}

/// Render a configuration back into the text form.
pub fn to_text(config: &ServiceConfig) -> Result<String, ConfigError> {
    Ok(serde_yaml::to_string(config)?)
}

/// Serialize a whole configuration as JSON (wire casing).
pub fn to_json(config: &ServiceConfig) -> Result<Vec<u8>, ConfigError> {
    Ok(serde_json::to_vec(&config.to_wire())?)
}

/// Parse a whole configuration from JSON (wire casing).
pub fn from_json(bytes: &[u8]) -> Result<ServiceConfig, ConfigError> {
    let wire: WireServiceConfig = serde_json::from_slice(bytes)?;
    Ok(ServiceConfig::from_wire(wire))
}

/// Parse a single bucket definition from a JSON body.
///
/// Missing fields decode as zero and are resolved by whoever stores the
/// bucket; the back-reference is left empty until the bucket is attached.
pub fn bucket_from_json(bytes: &[u8]) -> Result<BucketConfig, ConfigError> {
    let wire: WireBucketConfig = serde_json::from_slice(bytes)?;
    Ok(wire.into_model(""))
}

/// Parse a single namespace definition from a JSON body.
pub fn namespace_from_json(bytes: &[u8]) -> Result<NamespaceConfig, ConfigError> {
    let wire: WireNamespaceConfig = serde_json::from_slice(bytes)?;
    Ok(wire.into_model())
}

/// Serialize a single namespace as JSON (wire casing).
pub fn namespace_to_json(namespace: &NamespaceConfig) -> Result<Vec<u8>, ConfigError> {
    Ok(serde_json::to_vec(&WireNamespaceConfig::from_model(namespace))?)
}
