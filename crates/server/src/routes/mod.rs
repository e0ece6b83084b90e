pub mod admin;
pub mod auth;
pub mod channels;
pub mod dms;
pub mod messages;
pub mod notifications;
pub mod search;
pub mod users;

use crate::AppState;
use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use std::sync::Arc;

pub fn build_router(state: Arc<AppState>) -> Router {
    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout));

    let api_routes = Router::new()
        // Channels
        .route("/channels", post(channels::create_channel))
        .route("/channels", get(channels::list_channels))
        .route("/channels/all", get(channels::list_all_channels))
        .route("/channels/{channelId}", get(channels::channel_details))
        .route("/channels/{channelId}/join", post(channels::join_channel))
        .route("/channels/{channelId}/invite", post(channels::invite_to_channel))
        .route("/channels/{channelId}/leave", post(channels::leave_channel))
        .route("/channels/{channelId}/owners", post(channels::add_owner))
        .route("/channels/{channelId}/owners/{userId}", delete(channels::remove_owner))
        .route("/channels/{channelId}/messages", get(messages::list_channel_messages))
        .route("/channels/{channelId}/messages", post(messages::send_channel_message))
        .route("/channels/{channelId}/messages/later", post(messages::send_channel_message_later))
        // DMs
        .route("/dms", post(dms::create_dm))
        .route("/dms", get(dms::list_dms))
        .route("/dms/{dmId}", get(dms::dm_details))
        .route("/dms/{dmId}", delete(dms::remove_dm))
        .route("/dms/{dmId}/leave", post(dms::leave_dm))
        .route("/dms/{dmId}/messages", get(messages::list_dm_messages))
        .route("/dms/{dmId}/messages", post(messages::send_dm_message))
        .route("/dms/{dmId}/messages/later", post(messages::send_dm_message_later))
        // Messages are addressed workspace-globally by id
        .route("/messages/{messageId}", patch(messages::edit_message))
        .route("/messages/{messageId}", delete(messages::remove_message))
        .route("/messages/{messageId}/react", post(messages::react_to_message))
        .route("/messages/{messageId}/unreact", post(messages::unreact_to_message))
        .route("/messages/{messageId}/pin", post(messages::pin_message))
        .route("/messages/{messageId}/unpin", post(messages::unpin_message))
        .route("/messages/{messageId}/share", post(messages::share_message))
        // Users
        .route("/users", get(users::list_users))
        .route("/users/{userId}", get(users::user_profile))
        .route("/users/me/name", patch(users::set_name))
        .route("/users/me/email", patch(users::set_email))
        .route("/users/me/handle", patch(users::set_handle))
        .route("/users/me/stats", get(users::user_stats))
        .route("/workspace/stats", get(users::workspace_stats))
        // Admin
        .route("/admin/users/{userId}", delete(admin::remove_user))
        .route("/admin/users/{userId}/permissions", patch(admin::change_permission))
        // Search + notifications
        .route("/search", get(search::search_messages))
        .route("/notifications", get(notifications::get_notifications));

    Router::new()
        .nest("/api/auth", auth_routes)
        .nest("/api", api_routes)
        .with_state(state)
}
