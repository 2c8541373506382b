use serde::Serialize;
use serde_json::Value;

use crate::types::{Document, DocumentPage, TENANT_FIELD};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlobalBody {
    pub data: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionBody {
    pub data: Vec<Document>,
    pub total_docs: u64,
    pub total_pages: u64,
    pub page: u32,
    pub limit: u32,
}

/// Successful `GET /content` body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ContentResponse {
    Global(GlobalBody),
    Collection(CollectionBody),
}

impl ContentResponse {
    /// Stored value returned verbatim.
    pub fn global(data: Value) -> Self {
        ContentResponse::Global(GlobalBody { data })
    }

    /// Public collection page; the tenant field is removed from every document.
    pub fn collection(page: DocumentPage) -> Self {
        let data = page.docs.into_iter().map(strip_tenant).collect();
        ContentResponse::Collection(CollectionBody {
            data,
            total_docs: page.total_docs,
            total_pages: page.total_pages,
            page: page.page,
            limit: page.limit,
        })
    }
}

fn strip_tenant(mut doc: Document) -> Document {
    doc.remove(TENANT_FIELD);
    doc
}
