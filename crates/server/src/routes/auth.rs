use axum::{extract::State, http::HeaderMap, Json};
use std::sync::Arc;

use crate::core::sessions;
use crate::error::ApiError;
use crate::models::{AuthResponse, LoginRequest, RegisterRequest};
use crate::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let mut ws = state.store.write().await;
    let (token, auth_user_id) = sessions::register(
        &mut ws,
        &body.email,
        &body.password,
        body.name_first.trim(),
        body.name_last.trim(),
    )?;
    state.persist(&ws);
    Ok(Json(AuthResponse {
        token,
        auth_user_id,
    }))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let mut ws = state.store.write().await;
    let (token, auth_user_id) = sessions::login(&mut ws, &body.email, &body.password)?;
    state.persist(&ws);
    Ok(Json(AuthResponse {
        token,
        auth_user_id,
    }))
}

/// POST /api/auth/logout
pub async fn logout(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, ApiError> {
    let token = bearer_token(&headers).ok_or(ApiError::Unauthenticated)?;
    let mut ws = state.store.write().await;
    sessions::logout(&mut ws, &token)?;
    state.persist(&ws);
    Ok(Json(serde_json::json!({})))
}

/// Session token from the Authorization header.
fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.to_string())
}
