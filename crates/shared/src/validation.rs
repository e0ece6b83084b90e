use crate::constants::*;

pub fn validate_email(email: &str) -> Result<(), String> {
    let email = email.trim();
    if email.is_empty() {
        return Err("Email is required".into());
    }
    let Some((local, domain)) = email.split_once('@') else {
        return Err("Email is not valid".into());
    };
    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err("Email is not valid".into());
    }
    if email.chars().any(|c| c.is_whitespace()) || domain.starts_with('.') || domain.ends_with('.') {
        return Err("Email is not valid".into());
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), String> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        ));
    }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<(), String> {
    if name.len() < MIN_NAME_LENGTH || name.len() > MAX_NAME_LENGTH {
        return Err(format!(
            "Name must be {}-{} characters",
            MIN_NAME_LENGTH, MAX_NAME_LENGTH
        ));
    }
    Ok(())
}

pub fn validate_handle(handle: &str) -> Result<(), String> {
    if handle.len() < MIN_HANDLE_LENGTH || handle.len() > MAX_HANDLE_LENGTH {
        return Err(format!(
            "Handle must be {}-{} characters",
            MIN_HANDLE_LENGTH, MAX_HANDLE_LENGTH
        ));
    }
    if !handle.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err("Handle can only contain letters and numbers".into());
    }
    Ok(())
}

pub fn validate_channel_name(name: &str) -> Result<(), String> {
    if name.len() < MIN_CHANNEL_NAME_LENGTH || name.len() > MAX_CHANNEL_NAME_LENGTH {
        return Err(format!(
            "Channel name must be {}-{} characters",
            MIN_CHANNEL_NAME_LENGTH, MAX_CHANNEL_NAME_LENGTH
        ));
    }
    Ok(())
}

pub fn validate_message_body(body: &str) -> Result<(), String> {
    if body.is_empty() {
        return Err("Message is required".into());
    }
    if body.chars().count() > MAX_MESSAGE_LENGTH {
        return Err(format!(
            "Message must be at most {} characters",
            MAX_MESSAGE_LENGTH
        ));
    }
    Ok(())
}

/// Edits allow the empty string (which deletes the message).
pub fn validate_edit_body(body: &str) -> Result<(), String> {
    if body.chars().count() > MAX_MESSAGE_LENGTH {
        return Err(format!(
            "Message must be at most {} characters",
            MAX_MESSAGE_LENGTH
        ));
    }
    Ok(())
}

pub fn validate_search_query(query: &str) -> Result<(), String> {
    if query.is_empty() || query.chars().count() > MAX_SEARCH_QUERY_LENGTH {
        return Err(format!(
            "Search query must be 1-{} characters",
            MAX_SEARCH_QUERY_LENGTH
        ));
    }
    Ok(())
}
