use streams_shared::constants::{REMOVED_MESSAGE_BODY, REMOVED_NAME_FIRST, REMOVED_NAME_LAST};
use streams_shared::validation;

use crate::core::authz;
use crate::error::{ApiError, ApiResult};
use crate::models::{UserProfile, UserStats, WorkspaceStats};
use crate::store::{PermissionLevel, RemovedUser, UserId, Workspace};

/// Profiles of every active user; removed users are excluded.
pub fn list_all(ws: &Workspace) -> Vec<UserProfile> {
    ws.users.values().map(UserProfile::from).collect()
}

/// A profile by id. Removed users stay resolvable with a redacted
/// profile so historical messages keep an attributable author.
pub fn profile(ws: &Workspace, user_id: UserId) -> ApiResult<UserProfile> {
    if let Some(user) = ws.user(user_id) {
        return Ok(UserProfile::from(user));
    }
    ws.removed_users
        .iter()
        .find(|u| u.id == user_id)
        .map(UserProfile::from)
        .ok_or_else(|| ApiError::input("User does not exist"))
}

pub fn set_name(ws: &mut Workspace, actor: UserId, name_first: &str, name_last: &str) -> ApiResult<()> {
    validation::validate_name(name_first)?;
    validation::validate_name(name_last)?;
    if let Some(user) = ws.user_mut(actor) {
        user.name_first = name_first.to_string();
        user.name_last = name_last.to_string();
    }
    Ok(())
}

pub fn set_email(ws: &mut Workspace, actor: UserId, email: &str) -> ApiResult<()> {
    let email = email.trim().to_lowercase();
    validation::validate_email(&email)?;
    if ws.users.values().any(|u| u.email == email && u.id != actor) {
        return Err(ApiError::input("Email already registered"));
    }
    if let Some(user) = ws.user_mut(actor) {
        user.email = email;
    }
    Ok(())
}

/// Changing a handle never rewrites frozen DM names.
pub fn set_handle(ws: &mut Workspace, actor: UserId, handle: &str) -> ApiResult<()> {
    validation::validate_handle(handle)?;
    if ws.users.values().any(|u| u.handle == handle && u.id != actor) {
        return Err(ApiError::input("Handle already taken"));
    }
    if let Some(user) = ws.user_mut(actor) {
        user.handle = handle.to_string();
    }
    Ok(())
}

pub fn stats(ws: &Workspace, actor: UserId) -> ApiResult<UserStats> {
    let user = ws
        .user(actor)
        .ok_or_else(|| ApiError::input("User does not exist"))?;
    let channels_joined = ws
        .channels
        .values()
        .filter(|c| c.member_ids.contains(&actor))
        .count();
    let dms_joined = ws.dms.values().filter(|d| d.member_ids.contains(&actor)).count();
    let messages_sent = user.messages_sent;

    let numerator = (channels_joined + dms_joined) as f64 + messages_sent as f64;
    let denominator =
        (ws.channels.len() + ws.dms.len()) as f64 + ws.total_messages_sent as f64;
    let involvement_rate = if denominator == 0.0 {
        0.0
    } else {
        (numerator / denominator).min(1.0)
    };

    Ok(UserStats {
        channels_joined,
        dms_joined,
        messages_sent,
        involvement_rate,
    })
}

pub fn workspace_stats(ws: &Workspace) -> WorkspaceStats {
    let involved = ws
        .users
        .keys()
        .filter(|&&id| {
            ws.channels.values().any(|c| c.member_ids.contains(&id))
                || ws.dms.values().any(|d| d.member_ids.contains(&id))
        })
        .count();
    let utilization_rate = if ws.users.is_empty() {
        0.0
    } else {
        involved as f64 / ws.users.len() as f64
    };
    WorkspaceStats {
        channels_exist: ws.channels.len(),
        dms_exist: ws.dms.len(),
        messages_exist: ws.live_message_count(),
        utilization_rate,
    }
}

/// Change a user's global permission level. Demoting the only global
/// owner is rejected, as is a no-op change.
pub fn change_permission(
    ws: &mut Workspace,
    actor: UserId,
    target: UserId,
    level: PermissionLevel,
) -> ApiResult<()> {
    authz::require_global_admin(ws, actor)?;
    let Some(user) = ws.user(target) else {
        return Err(ApiError::input("User does not exist"));
    };
    if user.permission_level == level {
        return Err(ApiError::input("User already has that permission level"));
    }
    if user.permission_level == PermissionLevel::Owner && count_global_owners(ws) == 1 {
        return Err(ApiError::input("Cannot demote the only global owner"));
    }
    if let Some(user) = ws.user_mut(target) {
        user.permission_level = level;
    }
    Ok(())
}

fn count_global_owners(ws: &Workspace) -> usize {
    ws.users
        .values()
        .filter(|u| u.permission_level == PermissionLevel::Owner)
        .count()
}

/// Remove a user from the workspace. Messages they authored in every
/// container they still belong to are redacted (authorship retained),
/// their membership is struck everywhere, their sessions are revoked, and
/// a redacted record keeps the id resolvable for attribution.
pub fn remove_user(ws: &mut Workspace, actor: UserId, target: UserId) -> ApiResult<()> {
    authz::require_global_admin(ws, actor)?;
    let Some(user) = ws.user(target) else {
        return Err(ApiError::input("User does not exist"));
    };
    if user.permission_level == PermissionLevel::Owner && count_global_owners(ws) == 1 {
        return Err(ApiError::input("Cannot remove the only global owner"));
    }

    for channel in ws.channels.values_mut() {
        if channel.member_ids.contains(&target) {
            for message in channel.messages.iter_mut().filter(|m| m.author_id == target) {
                message.body = REMOVED_MESSAGE_BODY.to_string();
            }
        }
        channel.member_ids.retain(|&m| m != target);
        channel.owner_ids.retain(|&o| o != target);
    }
    for dm in ws.dms.values_mut() {
        if dm.member_ids.contains(&target) {
            for message in dm.messages.iter_mut().filter(|m| m.author_id == target) {
                message.body = REMOVED_MESSAGE_BODY.to_string();
            }
        }
        dm.member_ids.retain(|&m| m != target);
        dm.owner_ids.retain(|&o| o != target);
    }

    ws.sessions.retain(|_, s| s.user_id != target);
    ws.notifications.remove(&target);
    if ws.users.remove(&target).is_some() {
        ws.removed_users.push(RemovedUser {
            id: target,
            name_first: REMOVED_NAME_FIRST.to_string(),
            name_last: REMOVED_NAME_LAST.to_string(),
        });
    }
    Ok(())
}
