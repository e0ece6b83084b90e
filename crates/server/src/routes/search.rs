use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::core::messages;
use crate::error::ApiError;
use crate::models::{AuthUser, SearchQuery};
use crate::AppState;

/// GET /api/search?q=...
pub async fn search_messages(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Query(query): Query<SearchQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let q = query.q.unwrap_or_default();
    let ws = state.store.read().await;
    let found = messages::search(&ws, user.id, &q)?;
    Ok(Json(serde_json::json!({ "messages": found })))
}
