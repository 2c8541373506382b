use thiserror::Error;

use crate::database::StoreError;

/// Everything that can stop a content request. Variants map onto the public
/// status codes in `crate::error`.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Missing x-api-key header")]
    AuthMissing,

    #[error("Invalid API key")]
    AuthInvalid,

    #[error("Missing required params: {}", .0.join(", "))]
    MissingParameters(Vec<&'static str>),

    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("Invalid type '{0}'. Use 'global' or 'collection'")]
    UnsupportedType(String),

    #[error("Collection '{0}' not available via public API")]
    UnsupportedKind(String),

    #[error("Global '{0}' not found")]
    NotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl GatewayError {
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        GatewayError::InvalidParameter { name, reason: reason.into() }
    }

    /// True for the 400-class request problems.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            GatewayError::MissingParameters(_)
                | GatewayError::InvalidParameter { .. }
                | GatewayError::UnsupportedType(_)
                | GatewayError::UnsupportedKind(_)
        )
    }
}
