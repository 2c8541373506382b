use sha2::{Digest, Sha256};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

use super::error::GatewayError;
use crate::database::models::Site;
use crate::database::ContentStore;
use crate::types::SiteId;

pub const API_KEY_PREFIX: &str = "cms_";
const API_KEY_LENGTH: usize = 32;
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Credential presented by a caller. Never printed in full.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// An absent or empty header is a missing credential.
    pub fn require(presented: Option<&str>) -> Result<Self, GatewayError> {
        match presented {
            Some(key) if !key.is_empty() => Ok(Self(key.to_string())),
            _ => Err(GatewayError::AuthMissing),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short SHA-256 prefix that identifies a key in logs without revealing it.
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.0.as_bytes());
        digest.iter().take(6).map(|b| format!("{:02x}", b)).collect()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKey({})", self.fingerprint())
    }
}

/// Generates a key in the `cms_` + 32 lowercase base-36 format site records use.
pub fn generate_api_key() -> String {
    let mut key = String::with_capacity(API_KEY_PREFIX.len() + API_KEY_LENGTH);
    key.push_str(API_KEY_PREFIX);
    while key.len() < API_KEY_PREFIX.len() + API_KEY_LENGTH {
        for byte in Uuid::new_v4().into_bytes() {
            // 252 = 7 * 36; rejecting the tail keeps every symbol equally likely
            if byte < 252 && key.len() < API_KEY_PREFIX.len() + API_KEY_LENGTH {
                key.push(BASE36[(byte % 36) as usize] as char);
            }
        }
    }
    key
}

/// Authorization context for one request. Created only by `TenantResolver`
/// and passed by reference down the call chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteContext {
    site_id: SiteId,
    slug: String,
}

impl SiteContext {
    pub fn site_id(&self) -> SiteId {
        self.site_id
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }
}

impl From<&Site> for SiteContext {
    fn from(site: &Site) -> Self {
        Self { site_id: site.id, slug: site.slug.clone() }
    }
}

/// Maps an API key to the active site that owns it.
#[derive(Clone)]
pub struct TenantResolver {
    store: Arc<dyn ContentStore>,
}

impl TenantResolver {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self { store }
    }

    /// Unknown keys and keys of inactive sites both fail with `AuthInvalid`.
    pub async fn resolve(&self, key: &ApiKey) -> Result<SiteContext, GatewayError> {
        let site = self
            .store
            .find_active_site(key.as_str())
            .await?
            .filter(|site| site.active && site.api_key == key.as_str());

        match site {
            Some(site) => {
                tracing::debug!("Resolved API key {} to site '{}'", key.fingerprint(), site.slug);
                Ok(SiteContext::from(&site))
            }
            None => {
                tracing::warn!("Rejected API key {}", key.fingerprint());
                Err(GatewayError::AuthInvalid)
            }
        }
    }
}
