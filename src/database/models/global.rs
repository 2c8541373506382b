use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

use crate::types::SiteId;

/// Site-scoped singleton content blob, unique per (site, key).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Global {
    #[sqlx(rename = "site_id")]
    pub site: SiteId,
    pub key: String,
    /// Stored verbatim; no schema is enforced.
    pub data: Value,
}
