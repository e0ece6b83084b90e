pub const APP_NAME: &str = "Streams";

// Limits
pub const MAX_MESSAGE_LENGTH: usize = 1000;
pub const MIN_CHANNEL_NAME_LENGTH: usize = 1;
pub const MAX_CHANNEL_NAME_LENGTH: usize = 20;
pub const MIN_NAME_LENGTH: usize = 1;
pub const MAX_NAME_LENGTH: usize = 50;
pub const MIN_PASSWORD_LENGTH: usize = 6;
pub const MIN_HANDLE_LENGTH: usize = 3;
pub const MAX_HANDLE_LENGTH: usize = 20;
pub const MAX_SEARCH_QUERY_LENGTH: usize = 1000;

// Pagination
pub const MESSAGE_PAGE_SIZE: usize = 50;
pub const PAGE_END: i64 = -1;

// Notifications
pub const NOTIFICATION_PAGE_SIZE: usize = 20;
pub const NOTIFICATION_PREVIEW_LENGTH: usize = 20;

// Reacts: thumbs-up is the only recognized kind
pub const THUMBS_UP_REACT_ID: i64 = 1;

// Redaction applied when a user is removed from the workspace
pub const REMOVED_MESSAGE_BODY: &str = "Removed user";
pub const REMOVED_NAME_FIRST: &str = "Removed";
pub const REMOVED_NAME_LAST: &str = "user";
