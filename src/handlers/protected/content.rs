// handlers/protected/content.rs - GET /content handler
use axum::{
    extract::{Extension, RawQuery, State},
    response::Json,
};

use crate::error::ApiError;
use crate::gateway::{ContentResponse, RequestParams};
use crate::middleware::PresentedKey;
use crate::server::AppState;

/// GET /content?type=global|collection&key=... - read content for the caller's site
pub async fn content_get(
    State(state): State<AppState>,
    Extension(presented): Extension<PresentedKey>,
    RawQuery(query): RawQuery,
) -> Result<Json<ContentResponse>, ApiError> {
    let params = RequestParams::from_query(query.as_deref());
    let response = state.gateway.handle(presented.as_deref(), &params).await?;
    Ok(Json(response))
}
