use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};

use streams_shared::constants::MAX_HANDLE_LENGTH;
use streams_shared::validation;

use crate::error::{ApiError, ApiResult};
use crate::store::{PermissionLevel, Session, User, UserId, Workspace};

/// Register a new user and open a session. The first user registered
/// becomes the global owner.
pub fn register(
    ws: &mut Workspace,
    email: &str,
    password: &str,
    name_first: &str,
    name_last: &str,
) -> ApiResult<(String, UserId)> {
    let email = email.trim().to_lowercase();
    validation::validate_email(&email)?;
    validation::validate_password(password)?;
    validation::validate_name(name_first)?;
    validation::validate_name(name_last)?;
    if ws.email_taken(&email) {
        return Err(ApiError::input("Email already registered"));
    }

    let password_hash = hash_password(password)?;
    let handle = derive_handle(ws, name_first, name_last);
    let permission_level = if ws.users.is_empty() {
        PermissionLevel::Owner
    } else {
        PermissionLevel::Member
    };

    let id = ws.alloc_user_id();
    ws.users.insert(
        id,
        User {
            id,
            email,
            password_hash,
            name_first: name_first.to_string(),
            name_last: name_last.to_string(),
            handle,
            permission_level,
            profile_image_url: None,
            session_ids: Vec::new(),
            messages_sent: 0,
        },
    );

    let token = issue_session(ws, id);
    Ok((token, id))
}

pub fn login(ws: &mut Workspace, email: &str, password: &str) -> ApiResult<(String, UserId)> {
    let email = email.trim().to_lowercase();
    // Same error for unknown email and wrong password
    let Some(user) = ws.user_by_email(&email) else {
        return Err(ApiError::input("Incorrect email or password"));
    };
    let id = user.id;
    let stored_hash = user.password_hash.clone();
    if !verify_password(password, &stored_hash) {
        return Err(ApiError::input("Incorrect email or password"));
    }
    let token = issue_session(ws, id);
    Ok((token, id))
}

/// Revoke exactly the session behind `token`.
pub fn logout(ws: &mut Workspace, token: &str) -> ApiResult<()> {
    let Some(session) = ws.sessions.remove(token) else {
        return Err(ApiError::Unauthenticated);
    };
    if let Some(user) = ws.user_mut(session.user_id) {
        user.session_ids.retain(|s| s != &session.session_id);
    }
    Ok(())
}

fn issue_session(ws: &mut Workspace, user_id: UserId) -> String {
    let token = uuid::Uuid::new_v4().to_string();
    let session_id = uuid::Uuid::new_v4().to_string();
    ws.sessions.insert(
        token.clone(),
        Session {
            session_id: session_id.clone(),
            user_id,
        },
    );
    if let Some(user) = ws.user_mut(user_id) {
        user.session_ids.push(session_id);
    }
    token
}

fn hash_password(password: &str) -> ApiResult<String> {
    let salt = SaltString::generate(&mut rand::rngs::OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|_| ApiError::input("Password could not be processed"))
}

fn verify_password(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Lowercase alphanumeric concatenation of the names, truncated to 20
/// chars; a numeric suffix is appended when taken (the suffix may push
/// past 20).
pub(crate) fn derive_handle(ws: &Workspace, name_first: &str, name_last: &str) -> String {
    let base: String = format!("{name_first}{name_last}")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .take(MAX_HANDLE_LENGTH)
        .collect();
    if !base.is_empty() && !ws.handle_taken(&base) {
        return base;
    }
    let mut suffix = 0;
    loop {
        let candidate = format!("{base}{suffix}");
        if !ws.handle_taken(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}
