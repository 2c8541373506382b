/// Shared types used across the codebase

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// A content document as it leaves the store: opaque passthrough fields plus
/// the well-known `id`, `site`, `slug`, `status`, `createdAt` and `updatedAt` keys.
pub type Document = Map<String, Value>;

/// Key carrying the owning tenant on every stored document.
pub const TENANT_FIELD: &str = "site";

/// Stable identifier of a site (tenant).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct SiteId(pub i32);

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Record collections that exist in the store. Whether a kind is reachable
/// through the public API is decided by `gateway::allowlist`, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Projects,
    Pages,
}

impl ContentKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Projects => "projects",
            ContentKind::Pages => "pages",
        }
    }

    pub const fn table_name(&self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Draft/published visibility predicate for collection reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusFilter {
    /// `status=all`: no status predicate.
    Any,
    Only(String),
}

impl StatusFilter {
    pub fn matches(&self, status: Option<&str>) -> bool {
        match self {
            StatusFilter::Any => true,
            StatusFilter::Only(wanted) => status == Some(wanted.as_str()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn to_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }

    /// Missing values sort first ascending and last descending, in every store.
    pub fn nulls_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "NULLS FIRST",
            SortDirection::Desc => "NULLS LAST",
        }
    }
}

/// Sort order requested by the caller: a document field name, optionally
/// prefixed with `-` for descending order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn ascending(field: impl Into<String>) -> Self {
        Self { field: field.into(), direction: SortDirection::Asc }
    }

    /// Parses `field` or `-field`. Returns `None` when the field is not a plain
    /// identifier (`[A-Za-z_][A-Za-z0-9_]*`).
    pub fn parse(raw: &str) -> Option<Self> {
        let (field, direction) = match raw.strip_prefix('-') {
            Some(rest) => (rest, SortDirection::Desc),
            None => (raw, SortDirection::Asc),
        };
        if !is_identifier(field) {
            return None;
        }
        Some(Self { field: field.to_string(), direction })
    }

    /// Canonical document key for the sort field; snake_case timestamp aliases
    /// resolve to the camelCase keys documents are published with.
    pub fn document_field(&self) -> &str {
        match self.field.as_str() {
            "created_at" => "createdAt",
            "updated_at" => "updatedAt",
            other => other,
        }
    }
}

/// Tenant-scoped read of one collection, as produced by the gateway's query
/// builder and executed by a `ContentStore`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentQuery {
    pub kind: ContentKind,
    pub site: SiteId,
    pub slug: Option<String>,
    pub status: StatusFilter,
    pub sort: SortSpec,
    pub limit: u32,
    /// 1-indexed
    pub page: u32,
}

impl ContentQuery {
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }
}

/// One page of collection results with the totals the store computed.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentPage {
    pub docs: Vec<Document>,
    pub total_docs: u64,
    pub total_pages: u64,
    pub page: u32,
    pub limit: u32,
}

impl DocumentPage {
    pub fn new(docs: Vec<Document>, total_docs: u64, page: u32, limit: u32) -> Self {
        let total_pages = if limit == 0 { 0 } else { total_docs.div_ceil(u64::from(limit)) };
        Self { docs, total_docs, total_pages, page, limit }
    }
}

pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
