use serde_json::Value;

pub use crate::types::SortDirection;

/// Equality predicate on one column; `Null` renders as `IS NULL`.
#[derive(Debug, Clone)]
pub struct FilterCondition {
    pub column: String,
    pub data: Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderTarget {
    Column(String),
    /// Top-level key of a jsonb column: `"column" -> 'key'`
    JsonField { column: String, key: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOrderInfo {
    pub target: OrderTarget,
    pub sort: SortDirection,
}

#[derive(Debug, Clone)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<Value>,
}
