/// Fixed key of the settings singleton row.
pub const SETTINGS_ROW_ID: &str = "default";

pub const DEFAULT_REMINDER_DAYS_BEFORE: i64 = 7;
pub const DEFAULT_CURRENCY: &str = "USD";
pub const DEFAULT_LANGUAGE: &str = "en";

/// Completed reminders kept in the history view.
pub const COMPLETED_REMINDERS_DISPLAY_LIMIT: usize = 10;

/// Upcoming reminders shown on the home screen.
pub const UPCOMING_PREVIEW_LIMIT: usize = 3;

/// Attachment extensions treated as images; anything else is a document.
pub const ACCEPTED_IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpeg", "jpg", "heic"];
