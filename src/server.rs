use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    middleware,
    routing::get,
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{AppConfig, SecurityConfig, StoreBackend};
use crate::database::{ContentStore, MemoryStore, PgContentStore, StoreError};
use crate::gateway::ContentGateway;
use crate::handlers::{protected, public};
use crate::middleware::{api_key_middleware, API_KEY_HEADER};

/// Shared by every handler; cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<ContentGateway>,
    pub store: Arc<dyn ContentStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn ContentStore>, config: &AppConfig) -> Self {
        let gateway = ContentGateway::new(store.clone(), &config.content);
        Self { gateway: Arc::new(gateway), store }
    }
}

/// Opens the configured store backend.
pub async fn build_store(config: &AppConfig) -> Result<Arc<dyn ContentStore>, StoreError> {
    match config.store.backend {
        StoreBackend::Postgres => {
            let store = PgContentStore::connect(&config.database).await?;
            Ok(Arc::new(store))
        }
        StoreBackend::Memory => {
            let path = config
                .store
                .fixture_path
                .as_deref()
                .ok_or(StoreError::ConfigMissing("CONTENT_FIXTURE"))?;
            let store = MemoryStore::load(path)?;
            tracing::info!("Loaded {} sites from fixture {}", store.site_count(), path);
            Ok(Arc::new(store))
        }
    }
}

pub fn app(store: Arc<dyn ContentStore>, config: &AppConfig) -> Router {
    let state = AppState::new(store, config);

    let router = Router::new()
        // Public
        .route("/", get(public::root))
        .route("/health", get(public::health))
        // Site-scoped
        .merge(content_routes())
        .with_state(state)
        // Global middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(Duration::from_secs(config.server.request_timeout_secs))),
        );

    match cors_layer(&config.security) {
        Some(cors) => router.layer(cors),
        None => router,
    }
}

fn content_routes() -> Router<AppState> {
    Router::new()
        .route("/content", get(protected::content_get))
        .route_layer(middleware::from_fn(api_key_middleware))
}

/// Browser access is limited to the configured front-end origins.
fn cors_layer(security: &SecurityConfig) -> Option<CorsLayer> {
    if !security.enable_cors {
        return None;
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([Method::GET, Method::OPTIONS])
            .allow_headers([HeaderName::from_static(API_KEY_HEADER), header::CONTENT_TYPE]),
    )
}
