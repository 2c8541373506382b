// handlers/public/root.rs - GET / service banner
use axum::response::Json;
use serde_json::{json, Value};

pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "CMS Content Gateway",
            "version": version,
            "description": "Tenant-scoped public read API for headless CMS content",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "content": "/content?type=global|collection&key=... (x-api-key)",
            },
            "collections": crate::gateway::AllowlistPolicy::PERMITTED,
        }
    }))
}
