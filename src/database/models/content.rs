use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;
use sqlx::FromRow;

use crate::types::{Document, SiteId, TENANT_FIELD};

/// Row shape shared by the `projects` and `pages` tables.
#[derive(Debug, Clone, FromRow)]
pub struct ContentRow {
    pub id: i32,
    pub site_id: SiteId,
    pub slug: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Kind-specific passthrough fields
    pub fields: Value,
}

impl ContentRow {
    /// Flattens the row into the published document shape. Column values win
    /// over same-named keys inside `fields`.
    pub fn into_document(self) -> Document {
        let mut doc = match self.fields {
            Value::Object(map) => map,
            Value::Null => Document::new(),
            other => {
                let mut map = Document::new();
                map.insert("fields".to_string(), other);
                map
            }
        };
        doc.insert("id".to_string(), Value::from(self.id));
        doc.insert(TENANT_FIELD.to_string(), Value::from(self.site_id.0));
        doc.insert("slug".to_string(), Value::String(self.slug));
        doc.insert("status".to_string(), Value::String(self.status));
        doc.insert("createdAt".to_string(), Value::String(timestamp(self.created_at)));
        doc.insert("updatedAt".to_string(), Value::String(timestamp(self.updated_at)));
        doc
    }
}

fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
