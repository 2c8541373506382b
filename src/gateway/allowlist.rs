use super::error::GatewayError;
use crate::types::ContentKind;

/// The public surface's only door into record collections. Kinds are matched
/// against this fixed table by exact name; nothing the store exposes is
/// reachable unless it is listed here.
pub struct AllowlistPolicy;

impl AllowlistPolicy {
    pub const PERMITTED: [ContentKind; 2] = [ContentKind::Projects, ContentKind::Pages];

    pub fn is_permitted(kind: &str) -> bool {
        Self::lookup(kind).is_some()
    }

    pub fn check(kind: &str) -> Result<ContentKind, GatewayError> {
        Self::lookup(kind).ok_or_else(|| GatewayError::UnsupportedKind(kind.to_string()))
    }

    fn lookup(kind: &str) -> Option<ContentKind> {
        Self::PERMITTED.iter().copied().find(|permitted| permitted.as_str() == kind)
    }
}
