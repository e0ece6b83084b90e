use axum::{extract::State, Json};
use std::sync::Arc;

use crate::core::notifications;
use crate::models::AuthUser;
use crate::AppState;

/// GET /api/notifications
pub async fn get_notifications(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Json<serde_json::Value> {
    let ws = state.store.read().await;
    Json(serde_json::json!({ "notifications": notifications::get(&ws, user.id) }))
}
