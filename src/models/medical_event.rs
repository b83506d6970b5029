use crate::consts;
use base64::Engine;
use chrono::{DateTime, Utc};
use derive_more::Display;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Display, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MedicalEventType {
    #[default]
    #[display("consultation")]
    Consultation,
    #[display("vaccination")]
    Vaccination,
    #[display("deworming")]
    Deworming,
    #[display("exam")]
    Exam,
    #[display("surgery")]
    Surgery,
    #[display("medication")]
    Medication,
}

#[derive(Debug, Display, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    #[default]
    #[display("image")]
    Image,
    #[display("document")]
    Document,
}

/// File attached to a medical event. Owned by the event and persisted
/// inside its row; attachments have no lifecycle of their own.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: AttachmentKind,
    /// base64 encoded payload, with or without a `data:` URL prefix
    pub data: String,
    /// decoded payload size in bytes
    pub size: i64,
    pub uploaded_at: DateTime<Utc>,
}

impl Attachment {
    /// Builds an attachment from a base64 payload, inferring the kind
    /// from the file extension and measuring the decoded size.
    pub fn new(name: &str, data: String, now: DateTime<Utc>) -> anyhow::Result<Self> {
        let payload = data
            .split_once(";base64,")
            .map(|(_, encoded)| encoded)
            .unwrap_or(&data);

        let size = base64::engine::general_purpose::STANDARD
            .decode(payload.trim())?
            .len() as i64;

        Ok(Attachment {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            kind: Self::kind_from_name(name),
            data,
            size,
            uploaded_at: now,
        })
    }

    fn kind_from_name(name: &str) -> AttachmentKind {
        let extension = name.rsplit_once('.').map(|(_, ext)| ext.to_lowercase());

        match extension {
            Some(ext) if consts::ACCEPTED_IMAGE_EXTENSIONS.contains(&ext.as_str()) => {
                AttachmentKind::Image
            }
            _ => AttachmentKind::Document,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MedicalEvent {
    pub id: String,
    pub pet_id: String,
    #[serde(rename = "type")]
    pub event_type: MedicalEventType,
    pub title: String,
    pub date: DateTime<Utc>,
    pub description: Option<String>,
    pub veterinarian: Option<String>,
    pub clinic: Option<String>,
    pub cost: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
    pub next_appointment: Option<DateTime<Utc>>,
    pub reminder_enabled: Option<bool>,
    pub reminder_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Caller-settable fields of a [MedicalEvent].
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMedicalEvent {
    pub pet_id: String,
    #[serde(rename = "type")]
    pub event_type: MedicalEventType,
    pub title: String,
    pub date: DateTime<Utc>,
    pub description: Option<String>,
    pub veterinarian: Option<String>,
    pub clinic: Option<String>,
    pub cost: Option<Decimal>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    pub next_appointment: Option<DateTime<Utc>>,
    pub reminder_enabled: Option<bool>,
    pub reminder_date: Option<DateTime<Utc>>,
}

/// Partial update for a [MedicalEvent]. `Some(None)` on an optional
/// field clears the stored value.
#[derive(Debug, Clone, Default)]
pub struct MedicalEventPatch {
    pub event_type: Option<MedicalEventType>,
    pub title: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub description: Option<Option<String>>,
    pub veterinarian: Option<Option<String>>,
    pub clinic: Option<Option<String>>,
    pub cost: Option<Option<Decimal>>,
    pub attachments: Option<Vec<Attachment>>,
    pub next_appointment: Option<Option<DateTime<Utc>>>,
    pub reminder_enabled: Option<Option<bool>>,
    pub reminder_date: Option<Option<DateTime<Utc>>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl MedicalEvent {
    pub fn create(data: NewMedicalEvent, now: DateTime<Utc>) -> Self {
        MedicalEvent {
            id: Uuid::new_v4().to_string(),
            pet_id: data.pet_id,
            event_type: data.event_type,
            title: data.title,
            date: data.date,
            description: data.description,
            veterinarian: data.veterinarian,
            clinic: data.clinic,
            cost: data.cost,
            attachments: data.attachments,
            next_appointment: data.next_appointment,
            reminder_enabled: data.reminder_enabled,
            reminder_date: data.reminder_date,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attachment_new_measures_decoded_size() {
        let encoded = base64::engine::general_purpose::STANDARD.encode(b"vaccination card");
        let attachment = Attachment::new("card.pdf", encoded, Utc::now()).unwrap();

        assert_eq!(attachment.size, 16);
        assert_eq!(attachment.kind, AttachmentKind::Document);
    }

    #[test]
    fn test_attachment_new_strips_data_url_prefix() {
        let encoded = base64::engine::general_purpose::STANDARD.encode(b"img");
        let data = format!("data:image/png;base64,{encoded}");
        let attachment = Attachment::new("rex.png", data, Utc::now()).unwrap();

        assert_eq!(attachment.size, 3);
        assert_eq!(attachment.kind, AttachmentKind::Image);
    }

    #[test]
    fn test_attachment_new_rejects_invalid_payload() {
        assert!(Attachment::new("broken.png", "not base64!!".into(), Utc::now()).is_err());
    }
}
