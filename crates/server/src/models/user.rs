use serde::{Deserialize, Serialize};

use crate::store::{PermissionLevel, RemovedUser, User, UserId};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: UserId,
    pub email: String,
    pub name_first: String,
    pub name_last: String,
    pub handle: String,
    pub profile_image_url: Option<String>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name_first: user.name_first.clone(),
            name_last: user.name_last.clone(),
            handle: user.handle.clone(),
            profile_image_url: user.profile_image_url.clone(),
        }
    }
}

impl From<&RemovedUser> for UserProfile {
    fn from(user: &RemovedUser) -> Self {
        Self {
            id: user.id,
            email: String::new(),
            name_first: user.name_first.clone(),
            name_last: user.name_last.clone(),
            handle: String::new(),
            profile_image_url: None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name_first: String,
    pub name_last: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub auth_user_id: UserId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetNameRequest {
    pub name_first: String,
    pub name_last: String,
}

#[derive(Debug, Deserialize)]
pub struct SetEmailRequest {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct SetHandleRequest {
    pub handle: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePermissionRequest {
    pub permission_level: PermissionLevel,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub channels_joined: usize,
    pub dms_joined: usize,
    pub messages_sent: u64,
    pub involvement_rate: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceStats {
    pub channels_exist: usize,
    pub dms_exist: usize,
    pub messages_exist: usize,
    pub utilization_rate: f64,
}
