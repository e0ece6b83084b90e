use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::error::ApiError;
use crate::models::AuthUser;
use crate::AppState;

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "));

        let token = match token {
            Some(t) if !t.is_empty() => t,
            _ => return Err(ApiError::Unauthenticated.into_response()),
        };

        let ws = state.store.read().await;
        match ws.sessions.get(token) {
            Some(session) => Ok(AuthUser {
                id: session.user_id,
                session_id: session.session_id.clone(),
            }),
            None => Err(ApiError::Unauthenticated.into_response()),
        }
    }
}
