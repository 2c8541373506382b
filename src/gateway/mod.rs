//! Tenant-scoped public read path.
//!
//! `ContentGateway::handle` runs a request through a fixed sequence:
//!
//! 1. credential presence (`AuthMissing`)
//! 2. parameter validation, including the collection allowlist (400 class)
//! 3. tenant resolution (`AuthInvalid`)
//! 4. one store read scoped to the resolved site
//!
//! Validation never touches the store, so a disallowed collection is refused
//! identically for valid and invalid keys.

pub mod allowlist;
pub mod error;
pub mod query;
pub mod request;
pub mod response;
pub mod tenant;

pub use allowlist::AllowlistPolicy;
pub use error::GatewayError;
pub use query::{CollectionParams, QueryBuilder};
pub use request::{ContentRequest, RequestParams};
pub use response::ContentResponse;
pub use tenant::{generate_api_key, ApiKey, SiteContext, TenantResolver, API_KEY_PREFIX};

use std::sync::Arc;

use crate::config::ContentConfig;
use crate::database::ContentStore;

#[derive(Clone)]
pub struct ContentGateway {
    store: Arc<dyn ContentStore>,
    resolver: TenantResolver,
    builder: QueryBuilder,
}

impl ContentGateway {
    pub fn new(store: Arc<dyn ContentStore>, config: &ContentConfig) -> Self {
        Self {
            resolver: TenantResolver::new(store.clone()),
            builder: QueryBuilder::new(config),
            store,
        }
    }

    pub async fn handle(
        &self,
        api_key: Option<&str>,
        params: &RequestParams,
    ) -> Result<ContentResponse, GatewayError> {
        let key = ApiKey::require(api_key)?;
        let request = ContentRequest::parse(params, &self.builder)?;
        let ctx = self.resolver.resolve(&key).await?;

        match request {
            ContentRequest::Global { key } => {
                let global = self
                    .store
                    .find_global(ctx.site_id(), &key)
                    .await?
                    .filter(|g| g.site == ctx.site_id())
                    .ok_or(GatewayError::NotFound(key))?;
                Ok(ContentResponse::global(global.data))
            }
            ContentRequest::Collection { kind, params } => {
                let query = self.builder.build(&ctx, kind, params);
                let page = self.store.find_documents(&query).await?;
                tracing::debug!(
                    "Site '{}' read {} {} of {}",
                    ctx.slug(),
                    page.docs.len(),
                    kind,
                    page.total_docs
                );
                Ok(ContentResponse::collection(page))
            }
        }
    }
}
