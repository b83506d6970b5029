use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Display, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReminderType {
    #[display("vaccination")]
    Vaccination,
    #[display("medication")]
    Medication,
    #[display("appointment")]
    Appointment,
    #[display("deworming")]
    Deworming,
    #[default]
    #[display("other")]
    Other,
}

#[derive(Debug, Display, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceFrequency {
    #[default]
    #[display("daily")]
    Daily,
    #[display("weekly")]
    Weekly,
    #[display("monthly")]
    Monthly,
    #[display("yearly")]
    Yearly,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecurringRule {
    pub frequency: RecurrenceFrequency,
    /// every N units of `frequency`
    pub interval: u32,
    pub end_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: String,
    pub pet_id: String,
    pub event_id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub due_date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub reminder_type: ReminderType,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub recurring: Option<RecurringRule>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Caller-settable fields of a [Reminder].
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReminder {
    pub pet_id: String,
    pub event_id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub due_date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub reminder_type: ReminderType,
    #[serde(default)]
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub recurring: Option<RecurringRule>,
}

/// Partial update for a [Reminder]. `Some(None)` on an optional field
/// clears the stored value.
#[derive(Debug, Clone, Default)]
pub struct ReminderPatch {
    pub event_id: Option<Option<String>>,
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub due_date: Option<DateTime<Utc>>,
    pub reminder_type: Option<ReminderType>,
    pub completed: Option<bool>,
    pub completed_at: Option<Option<DateTime<Utc>>>,
    pub recurring: Option<Option<RecurringRule>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Reminder {
    pub fn create(data: NewReminder, now: DateTime<Utc>) -> Self {
        Reminder {
            id: Uuid::new_v4().to_string(),
            pet_id: data.pet_id,
            event_id: data.event_id,
            title: data.title,
            description: data.description,
            due_date: data.due_date,
            reminder_type: data.reminder_type,
            completed: data.completed,
            completed_at: data.completed_at,
            recurring: data.recurring,
            created_at: now,
            updated_at: now,
        }
    }
}
