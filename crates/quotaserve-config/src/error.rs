//! Error types for configuration loading and conversion.

/// Errors produced while loading, validating, or converting a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A namespace defines both a default bucket and a dynamic bucket
    /// template. The whole load is rejected; no partially valid model is
    /// ever returned.
    #[error(
        "namespace {namespace} may not define both a default bucket and a dynamic bucket template"
    )]
    ConflictingBucketDefaults {
        /// Name of the offending namespace.
        namespace: String,
    },

    /// The human-editable text form could not be parsed.
    #[error("failed to parse configuration text: {0}")]
    Text(#[from] serde_yaml::Error),

    /// A JSON document could not be parsed or produced.
    #[error("invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// The binary wire form could not be decoded.
    #[error("failed to decode wire configuration: {0}")]
    WireDecode(String),

    /// The binary wire form could not be encoded.
    #[error("failed to encode wire configuration: {0}")]
    WireEncode(String),
}
