#![allow(dead_code)]

use std::net::SocketAddr;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{json, Value};

use cms_content_gateway::config::AppConfig;
use cms_content_gateway::database::models::{Global, Site};
use cms_content_gateway::database::{ContentStore, Fixture, MemoryStore, StoreError};
use cms_content_gateway::server;
use cms_content_gateway::types::{ContentQuery, DocumentPage, SiteId};

pub const KEY_A: &str = "cms_aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
pub const KEY_B: &str = "cms_bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";
pub const KEY_INACTIVE: &str = "cms_cccccccccccccccccccccccccccccccc";

#[derive(Clone)]
pub struct TestServer {
    pub base_url: String,
    client: reqwest::Client,
}

impl TestServer {
    /// GET /content with an optional x-api-key and a raw query string
    pub async fn content(&self, api_key: Option<&str>, query: &str) -> Result<reqwest::Response> {
        let mut req = self.client.get(format!("{}/content?{}", self.base_url, query));
        if let Some(key) = api_key {
            req = req.header("x-api-key", key);
        }
        Ok(req.send().await?)
    }

    pub async fn content_json(&self, api_key: Option<&str>, query: &str) -> Result<(StatusCode, Value)> {
        let res = self.content(api_key, query).await?;
        let status = res.status();
        Ok((status, res.json().await?))
    }

    pub async fn get(&self, path: &str) -> Result<reqwest::Response> {
        Ok(self.client.get(format!("{}{}", self.base_url, path)).send().await?)
    }
}

/// Two active sites with overlapping slugs plus one inactive site.
///
/// Site A: 5 published projects (a-1..a-5, created in that order) and one draft.
/// Site B: 2 published projects, one sharing the slug `shared` with site A.
pub fn test_fixture() -> Fixture {
    let mut projects = Vec::new();
    for i in 1..=5 {
        projects.push(json!({
            "id": i, "site": 1, "slug": format!("a-{i}"), "status": "published",
            "title": format!("A project {i}"), "year": 2020 + i,
            "createdAt": format!("2024-01-0{i}T00:00:00.000Z")
        }));
    }
    projects.push(json!({
        "id": 6, "site": 1, "slug": "a-draft", "status": "draft",
        "title": "A draft", "createdAt": "2024-01-06T00:00:00.000Z"
    }));
    projects.push(json!({
        "id": 7, "site": 2, "slug": "shared", "status": "published",
        "title": "B shared", "createdAt": "2023-06-01T00:00:00.000Z"
    }));
    projects.push(json!({
        "id": 8, "site": 2, "slug": "b-2", "status": "published",
        "title": "B project 2", "createdAt": "2023-06-02T00:00:00.000Z"
    }));
    projects.push(json!({
        "id": 9, "site": 1, "slug": "shared", "status": "draft",
        "title": "A shared draft", "createdAt": "2024-02-01T00:00:00.000Z"
    }));

    let fixture = json!({
        "sites": [
            { "id": 1, "slug": "site-a", "name": "Site A", "apiKey": KEY_A, "active": true },
            { "id": 2, "slug": "site-b", "name": "Site B", "apiKey": KEY_B, "active": true },
            { "id": 3, "slug": "site-c", "name": "Site C", "apiKey": KEY_INACTIVE, "active": false }
        ],
        "globals": [
            { "site": 1, "key": "hero", "data": { "name": "Site A", "roles": ["dev", "ops"], "count": 3, "flag": true, "nothing": null } },
            { "site": 2, "key": "hero", "data": { "name": "Site B" } },
            { "site": 2, "key": "contact", "data": "plain string" },
            { "site": 3, "key": "hero", "data": { "name": "Site C" } }
        ],
        "projects": projects,
        "pages": [
            { "id": 1, "site": 1, "slug": "/", "status": "published", "title": "Home", "createdAt": "2024-01-01T00:00:00.000Z" },
            { "id": 2, "site": 2, "slug": "/", "status": "published", "title": "B Home", "createdAt": "2023-01-01T00:00:00.000Z" }
        ]
    });

    Fixture::from_json(&fixture.to_string()).expect("test fixture is valid")
}

pub async fn spawn_app() -> Result<TestServer> {
    let store = MemoryStore::from_fixture(test_fixture())?;
    spawn_with_store(Arc::new(store), &AppConfig::development()).await
}

/// Runs the real router in-process on a free port.
pub async fn spawn_with_store(store: Arc<dyn ContentStore>, config: &AppConfig) -> Result<TestServer> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let app = server::app(store, config);

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok(TestServer {
        base_url: format!("http://{}", addr),
        client: reqwest::Client::new(),
    })
}

/// A store whose every call fails, as if the database were down.
pub struct UnavailableStore;

#[async_trait]
impl ContentStore for UnavailableStore {
    async fn find_active_site(&self, _api_key: &str) -> Result<Option<Site>, StoreError> {
        Err(StoreError::QueryError("connection refused".to_string()))
    }

    async fn find_global(&self, _site: SiteId, _key: &str) -> Result<Option<Global>, StoreError> {
        Err(StoreError::QueryError("connection refused".to_string()))
    }

    async fn find_documents(&self, _query: &ContentQuery) -> Result<DocumentPage, StoreError> {
        Err(StoreError::QueryError("connection refused".to_string()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::QueryError("connection refused".to_string()))
    }
}

/// The server binary running against the demo fixture; killed on drop.
pub struct BinaryServer {
    pub base_url: String,
    child: Child,
}

impl BinaryServer {
    pub fn spawn_demo() -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let fixture = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/portfolio.json");

        let child = Command::new(env!("CARGO_BIN_EXE_cms-content-gateway"))
            .env("APP_ENV", "development")
            .env("CONTENT_STORE", "memory")
            .env("CONTENT_FIXTURE", fixture)
            .env("API_PORT", port.to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::inherit())
            .spawn()
            .context("failed to spawn server binary")?;

        Ok(Self { base_url: format!("http://127.0.0.1:{}", port), child })
    }

    pub async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if let Ok(resp) = client.get(format!("{}/health", self.base_url)).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

impl Drop for BinaryServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}
