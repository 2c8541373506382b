use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::types::SiteId;

/// Tenant registry entry. Only the fields the gateway reads are mapped.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    pub id: SiteId,
    pub slug: String,
    #[serde(default)]
    pub name: Option<String>,
    pub api_key: String,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}
