//! In-process `ContentStore` loaded from a JSON fixture.
//!
//! The store is assembled once and then only read, so it needs no locking and
//! can be shared freely behind an `Arc`. Used for local development
//! (`CONTENT_STORE=memory`) and throughout the test suite.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::Path;

use crate::database::models::{Global, Site};
use crate::database::store::{ContentStore, StoreError};
use crate::types::{ContentKind, ContentQuery, Document, DocumentPage, SiteId, SortDirection, TENANT_FIELD};

/// On-disk fixture layout: `{ "sites": [...], "globals": [...], "projects": [...], "pages": [...] }`
#[derive(Debug, Default, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub sites: Vec<Site>,
    #[serde(default)]
    pub globals: Vec<Global>,
    #[serde(default)]
    pub projects: Vec<Document>,
    #[serde(default)]
    pub pages: Vec<Document>,
}

impl Fixture {
    pub fn from_json(text: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    sites: Vec<Site>,
    globals: HashMap<(SiteId, String), Global>,
    documents: HashMap<ContentKind, Vec<Document>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from a fixture, enforcing the same uniqueness and
    /// ownership rules the relational schema does.
    pub fn from_fixture(fixture: Fixture) -> Result<Self, StoreError> {
        let mut store = Self::new();
        for site in fixture.sites {
            store.insert_site(site)?;
        }
        for global in fixture.globals {
            store.insert_global(global)?;
        }
        for doc in fixture.projects {
            store.insert_document(ContentKind::Projects, doc)?;
        }
        for doc in fixture.pages {
            store.insert_document(ContentKind::Pages, doc)?;
        }
        Ok(store)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Self::from_fixture(Fixture::load(path)?)
    }

    pub fn insert_site(&mut self, site: Site) -> Result<(), StoreError> {
        if site.api_key.is_empty() {
            return Err(StoreError::Fixture(format!("site '{}' has an empty apiKey", site.slug)));
        }
        for existing in &self.sites {
            if existing.id == site.id {
                return Err(StoreError::Fixture(format!("duplicate site id {}", site.id)));
            }
            if existing.slug == site.slug {
                return Err(StoreError::Fixture(format!("duplicate site slug '{}'", site.slug)));
            }
            if existing.api_key == site.api_key {
                return Err(StoreError::Fixture(format!(
                    "sites '{}' and '{}' share an apiKey",
                    existing.slug, site.slug
                )));
            }
        }
        self.sites.push(site);
        Ok(())
    }

    pub fn insert_global(&mut self, global: Global) -> Result<(), StoreError> {
        self.require_site(global.site)?;
        let id = (global.site, global.key.clone());
        if self.globals.contains_key(&id) {
            return Err(StoreError::Fixture(format!(
                "duplicate global '{}' for site {}",
                global.key, global.site
            )));
        }
        self.globals.insert(id, global);
        Ok(())
    }

    /// Documents must carry a numeric `site`, a string `slug` and a string `status`.
    pub fn insert_document(&mut self, kind: ContentKind, doc: Document) -> Result<(), StoreError> {
        let site = doc
            .get(TENANT_FIELD)
            .and_then(Value::as_i64)
            .and_then(|id| i32::try_from(id).ok())
            .map(SiteId)
            .ok_or_else(|| StoreError::Fixture(format!("{} document without a numeric 'site'", kind)))?;
        self.require_site(site)?;
        for field in ["slug", "status"] {
            if !doc.get(field).is_some_and(Value::is_string) {
                return Err(StoreError::Fixture(format!("{} document without a string '{}'", kind, field)));
            }
        }
        self.documents.entry(kind).or_default().push(doc);
        Ok(())
    }

    pub fn site_count(&self) -> usize {
        self.sites.len()
    }

    pub fn global_count(&self) -> usize {
        self.globals.len()
    }

    pub fn document_count(&self, kind: ContentKind) -> usize {
        self.documents.get(&kind).map_or(0, Vec::len)
    }

    fn require_site(&self, site: SiteId) -> Result<(), StoreError> {
        if self.sites.iter().any(|s| s.id == site) {
            Ok(())
        } else {
            Err(StoreError::Fixture(format!("unknown site {}", site)))
        }
    }

}

fn matches(doc: &Document, query: &ContentQuery) -> bool {
    let owner = doc.get(TENANT_FIELD).and_then(Value::as_i64);
    if owner != Some(i64::from(query.site.0)) {
        return false;
    }
    if let Some(slug) = &query.slug {
        if doc.get("slug").and_then(Value::as_str) != Some(slug.as_str()) {
            return false;
        }
    }
    query.status.matches(doc.get("status").and_then(Value::as_str))
}

/// Total order matching PostgreSQL's jsonb ordering, with a missing key below
/// everything: missing < null < string < number < bool < array < object.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    fn rank(v: Option<&Value>) -> u8 {
        match v {
            None => 0,
            Some(Value::Null) => 1,
            Some(Value::String(_)) => 2,
            Some(Value::Number(_)) => 3,
            Some(Value::Bool(_)) => 4,
            Some(Value::Array(_)) => 5,
            Some(Value::Object(_)) => 6,
        }
    }

    match (a, b) {
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(x @ Value::Array(_)), Some(y @ Value::Array(_)))
        | (Some(x @ Value::Object(_)), Some(y @ Value::Object(_))) => x.to_string().cmp(&y.to_string()),
        _ => rank(a).cmp(&rank(b)),
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn find_active_site(&self, api_key: &str) -> Result<Option<Site>, StoreError> {
        Ok(self
            .sites
            .iter()
            .find(|site| site.active && site.api_key == api_key)
            .cloned())
    }

    async fn find_global(&self, site: SiteId, key: &str) -> Result<Option<Global>, StoreError> {
        Ok(self.globals.get(&(site, key.to_string())).cloned())
    }

    async fn find_documents(&self, query: &ContentQuery) -> Result<DocumentPage, StoreError> {
        let mut found: Vec<&Document> = self
            .documents
            .get(&query.kind)
            .map(|docs| docs.iter().filter(|doc| matches(doc, query)).collect())
            .unwrap_or_default();

        let field = query.sort.document_field();
        // ties fall back to ascending id, as the SQL store does
        found.sort_by(|a, b| {
            let ord = compare_values(a.get(field), b.get(field));
            let ord = match query.sort.direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            };
            ord.then_with(|| compare_values(a.get("id"), b.get("id")))
        });

        let total_docs = found.len() as u64;
        let offset = usize::try_from(query.offset()).unwrap_or(usize::MAX);
        let docs = found
            .into_iter()
            .skip(offset)
            .take(query.limit as usize)
            .cloned()
            .collect();

        Ok(DocumentPage::new(docs, total_docs, query.page, query.limit))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{SortSpec, StatusFilter};
    use serde_json::json;
    use std::collections::HashSet;

    fn fixture() -> Fixture {
        Fixture::from_json(
            &json!({
                "sites": [
                    { "id": 1, "slug": "portfolio", "apiKey": "cms_one", "active": true },
                    { "id": 2, "slug": "client", "apiKey": "cms_two", "active": false }
                ],
                "globals": [
                    { "site": 1, "key": "hero", "data": { "name": "Cameron" } }
                ],
                "projects": [
                    { "site": 1, "slug": "c", "status": "published", "createdAt": "2025-01-03", "year": 2023 },
                    { "site": 1, "slug": "a", "status": "published", "createdAt": "2025-01-01", "year": 2025 },
                    { "site": 1, "slug": "b", "status": "draft", "createdAt": "2025-01-02" },
                    { "site": 2, "slug": "a", "status": "published", "createdAt": "2025-01-01" }
                ]
            })
            .to_string(),
        )
        .unwrap()
    }

    fn query(site: i32) -> ContentQuery {
        ContentQuery {
            kind: ContentKind::Projects,
            site: SiteId(site),
            slug: None,
            status: StatusFilter::Only("published".to_string()),
            sort: SortSpec::ascending("createdAt"),
            limit: 100,
            page: 1,
        }
    }

    fn owners(docs: &[Document]) -> HashSet<i64> {
        docs.iter().filter_map(|d| d.get(TENANT_FIELD).and_then(Value::as_i64)).collect()
    }

    fn slugs(page: &DocumentPage) -> Vec<&str> {
        page.docs.iter().map(|d| d["slug"].as_str().unwrap()).collect()
    }

    #[tokio::test]
    async fn resolves_only_active_sites() {
        let store = MemoryStore::from_fixture(fixture()).unwrap();
        assert_eq!(store.find_active_site("cms_one").await.unwrap().unwrap().id, SiteId(1));
        assert!(store.find_active_site("cms_two").await.unwrap().is_none());
        assert!(store.find_active_site("cms_ONE").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn filters_by_site_and_status_then_sorts() {
        let store = MemoryStore::from_fixture(fixture()).unwrap();
        let page = store.find_documents(&query(1)).await.unwrap();
        assert_eq!(slugs(&page), vec!["a", "c"]);
        assert_eq!(page.total_docs, 2);
        assert_eq!(owners(&page.docs), HashSet::from([1]));

        let mut all = query(1);
        all.status = StatusFilter::Any;
        all.sort = SortSpec::parse("-createdAt").unwrap();
        let page = store.find_documents(&all).await.unwrap();
        assert_eq!(slugs(&page), vec!["c", "b", "a"]);
    }

    #[tokio::test]
    async fn missing_sort_fields_first_ascending_last_descending() {
        let store = MemoryStore::from_fixture(fixture()).unwrap();
        let mut q = query(1);
        q.status = StatusFilter::Any;
        q.sort = SortSpec::ascending("year");
        let page = store.find_documents(&q).await.unwrap();
        assert_eq!(slugs(&page), vec!["b", "c", "a"]);

        q.sort = SortSpec::parse("-year").unwrap();
        let page = store.find_documents(&q).await.unwrap();
        assert_eq!(slugs(&page), vec!["a", "c", "b"]);
    }

    #[tokio::test]
    async fn ties_break_on_ascending_id_in_both_directions() {
        let fixture = Fixture::from_json(
            &json!({
                "sites": [{ "id": 1, "slug": "s", "apiKey": "cms_s", "active": true }],
                "projects": [
                    { "id": 3, "site": 1, "slug": "third", "status": "published", "year": 2024 },
                    { "id": 1, "site": 1, "slug": "first", "status": "published", "year": 2024 },
                    { "id": 2, "site": 1, "slug": "second", "status": "published", "year": 2024 }
                ]
            })
            .to_string(),
        )
        .unwrap();
        let store = MemoryStore::from_fixture(fixture).unwrap();
        let mut q = query(1);
        for sort in ["year", "-year"] {
            q.sort = SortSpec::parse(sort).unwrap();
            let page = store.find_documents(&q).await.unwrap();
            assert_eq!(slugs(&page), vec!["first", "second", "third"], "{sort}");
        }
    }

    #[tokio::test]
    async fn pages_past_the_end_are_empty() {
        let store = MemoryStore::from_fixture(fixture()).unwrap();
        let mut q = query(1);
        q.limit = 2;
        q.page = 5;
        let page = store.find_documents(&q).await.unwrap();
        assert!(page.docs.is_empty());
        assert_eq!(page.total_docs, 2);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.page, 5);
    }

    #[test]
    fn rejects_fixtures_that_break_invariants() {
        let mut store = MemoryStore::from_fixture(fixture()).unwrap();

        let dup_key = Site {
            id: SiteId(3),
            slug: "other".to_string(),
            name: None,
            api_key: "cms_one".to_string(),
            active: true,
        };
        assert!(matches!(store.insert_site(dup_key), Err(StoreError::Fixture(_))));

        let dup_global = Global { site: SiteId(1), key: "hero".to_string(), data: json!(null) };
        assert!(matches!(store.insert_global(dup_global), Err(StoreError::Fixture(_))));

        let orphan = json!({ "site": 99, "slug": "x", "status": "published" });
        let orphan = orphan.as_object().unwrap().clone();
        assert!(matches!(store.insert_document(ContentKind::Pages, orphan), Err(StoreError::Fixture(_))));

        let no_status = json!({ "site": 1, "slug": "x" }).as_object().unwrap().clone();
        assert!(matches!(store.insert_document(ContentKind::Pages, no_status), Err(StoreError::Fixture(_))));
    }

    #[test]
    fn compares_mixed_json_values() {
        assert_eq!(compare_values(None, Some(&json!(null))), Ordering::Less);
        assert_eq!(compare_values(Some(&json!(null)), Some(&json!(""))), Ordering::Less);
        assert_eq!(compare_values(Some(&json!(2)), Some(&json!(10))), Ordering::Less);
        assert_eq!(compare_values(Some(&json!("b")), Some(&json!("a"))), Ordering::Greater);
        assert_eq!(compare_values(Some(&json!("1")), Some(&json!(1))), Ordering::Less);
        assert_eq!(compare_values(Some(&json!(1)), Some(&json!(true))), Ordering::Less);
        assert_eq!(compare_values(Some(&json!([1])), Some(&json!({ "a": 1 }))), Ordering::Less);
    }
}
