// Error types module
// Configuration errors are fatal at startup, render errors are per request

use thiserror::Error;

/// Errors raised while loading or binding configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The source document could not be parsed
    #[error("malformed configuration source: {0}")]
    Parse(#[source] config::ConfigError),

    /// A source value cannot be converted to the declared field type
    #[error("cannot bind '{key}': {reason}")]
    Bind { key: String, reason: String },

    /// The binding prefix is not a valid dotted path
    #[error("invalid binding prefix '{0}'")]
    InvalidPrefix(String),
}

impl ConfigError {
    pub(crate) fn bind(key: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::Bind {
            key: key.into(),
            reason: reason.to_string(),
        }
    }
}

/// Errors raised while rendering a response
#[derive(Debug, Error)]
pub enum RenderError {
    /// No variant is registered for the requested kind, or the tag is unknown
    #[error("unsupported render kind '{0}'")]
    UnsupportedKind(String),

    /// The payload could not be serialized
    #[error("payload is not serializable: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The payload shape has no representation in the target format
    #[error("{kind} cannot represent {shape} payloads")]
    Unrepresentable {
        kind: &'static str,
        shape: &'static str,
    },

    /// The sink already holds a body
    #[error("response already committed")]
    AlreadyCommitted,

    /// A body write was attempted before the content type was set
    #[error("content type must be set before writing the body")]
    HeaderNotSet,

    /// The model renderer failed
    #[error("model render failed: {0}")]
    Model(String),
}
