use async_trait::async_trait;
use thiserror::Error;

use crate::database::models::{Global, Site};
use crate::types::{ContentQuery, DocumentPage, SiteId};

/// Errors raised by store backends. None of these texts are shown to API callers.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error("Query error: {0}")]
    QueryError(String),

    #[error("Invalid fixture: {0}")]
    Fixture(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Read-only view of the tenant store. Every method is a single round-trip
/// and implementations hold no per-request state.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// The site whose API key equals `api_key` exactly and which is active.
    async fn find_active_site(&self, api_key: &str) -> Result<Option<Site>, StoreError>;

    async fn find_global(&self, site: SiteId, key: &str) -> Result<Option<Global>, StoreError>;

    /// Runs a filtered, sorted, paginated collection read and reports totals.
    async fn find_documents(&self, query: &ContentQuery) -> Result<DocumentPage, StoreError>;

    /// Connectivity check for `/health`.
    async fn ping(&self) -> Result<(), StoreError>;
}
