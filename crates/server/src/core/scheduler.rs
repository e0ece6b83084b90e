use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use crate::core::messages;
use crate::store::{ContainerRef, MessageId, UserId};
use crate::AppState;

/// One-shot deferred send. The task sleeps until `time_sent` and then
/// takes the same write lock as ordinary request handling, so deferred
/// insertion serializes with every other mutation. There is no
/// cancellation path; a scheduled send always fires.
pub fn schedule_send(
    state: Arc<AppState>,
    actor: UserId,
    container: ContainerRef,
    id: MessageId,
    body: String,
    time_sent: i64,
) {
    tokio::spawn(async move {
        let delay = (time_sent - Utc::now().timestamp()).max(0) as u64;
        tokio::time::sleep(Duration::from_secs(delay)).await;

        let mut ws = state.store.write().await;
        messages::deliver_deferred(&mut ws, actor, container, id, &body, time_sent);
        tracing::debug!("Deferred message {} delivered", id);
        state.persist(&ws);
    });
}
