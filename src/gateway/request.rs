use std::collections::HashMap;

use super::allowlist::AllowlistPolicy;
use super::error::GatewayError;
use super::query::{CollectionParams, QueryBuilder};
use crate::types::ContentKind;

/// Query-string parameters. The first occurrence of a name wins and empty
/// values count as absent.
#[derive(Debug, Clone, Default)]
pub struct RequestParams {
    values: HashMap<String, String>,
}

impl RequestParams {
    pub fn from_query(raw: Option<&str>) -> Self {
        raw.map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
            .unwrap_or_default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str).filter(|v| !v.is_empty())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RequestParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = HashMap::new();
        for (k, v) in iter {
            values.entry(k.into()).or_insert_with(|| v.into());
        }
        Self { values }
    }
}

/// A fully validated content request, ready for tenant resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentRequest {
    Global { key: String },
    Collection { kind: ContentKind, params: CollectionParams },
}

impl ContentRequest {
    /// Validates `type`, `key` and, for collections, the allowlist and the
    /// paging parameters. Touches no store.
    pub fn parse(params: &RequestParams, builder: &QueryBuilder) -> Result<Self, GatewayError> {
        let (content_type, key) = match (params.get("type"), params.get("key")) {
            (Some(t), Some(k)) => (t, k),
            (t, k) => {
                let mut missing = Vec::new();
                if t.is_none() {
                    missing.push("type");
                }
                if k.is_none() {
                    missing.push("key");
                }
                return Err(GatewayError::MissingParameters(missing));
            }
        };

        match content_type {
            "global" => Ok(ContentRequest::Global { key: key.to_string() }),
            "collection" => {
                let kind = AllowlistPolicy::check(key)?;
                let params = builder.parse(params)?;
                Ok(ContentRequest::Collection { kind, params })
            }
            other => Err(GatewayError::UnsupportedType(other.to_string())),
        }
    }
}
