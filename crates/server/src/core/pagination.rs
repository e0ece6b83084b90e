use streams_shared::constants::{MESSAGE_PAGE_SIZE, PAGE_END};

use crate::core::authz::{self, AccessLevel};
use crate::error::{ApiError, ApiResult};
use crate::models::{MessageView, MessageWindow};
use crate::store::{ContainerRef, UserId, Workspace};

/// Compute the visible window of a container's newest-first message
/// sequence. Backs both channel and DM listing; the container kind is a
/// parameter, not a code fork.
pub fn list_messages(
    ws: &Workspace,
    viewer: UserId,
    container: ContainerRef,
    start: i64,
) -> ApiResult<MessageWindow> {
    authz::authorize_container(ws, viewer, container, AccessLevel::View)?;

    let messages = ws
        .container_messages(container)
        .ok_or_else(|| ApiError::input("Container does not exist"))?;

    if start < 0 {
        return Err(ApiError::input("Start must not be negative"));
    }
    let count = messages.len();
    let start_at = start as usize;
    // start == count yields an empty page; only start > count errors.
    if start_at > count {
        return Err(ApiError::input("Start is beyond the last message"));
    }

    let page = (count - start_at).min(MESSAGE_PAGE_SIZE);
    let window = messages[start_at..start_at + page]
        .iter()
        .map(|m| MessageView::for_viewer(m, viewer))
        .collect();

    let end = if start_at + page == count {
        PAGE_END
    } else {
        (start_at + page) as i64
    };

    Ok(MessageWindow {
        messages: window,
        start,
        end,
    })
}
