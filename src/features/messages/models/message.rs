use sqlx::FromRow;

use crate::features::messages::dtos::MessageResponseDto;

/// Database model for a message (announcement).
///
/// `active` is stored as 0/1. A row is never simultaneously active and
/// scheduled: activation clears `scheduled_at`, and a schedule can only be
/// set on an inactive row. Datetime columns are TEXT in database local
/// time; `created_at`/`updated_at` are maintained by the store.
#[derive(Debug, Clone, FromRow)]
pub struct Message {
    pub message_id: i64,
    pub name: String,
    pub body: String,
    pub active: i64,
    pub active_at: Option<String>,
    pub scheduled_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Message> for MessageResponseDto {
    fn from(m: Message) -> Self {
        Self {
            message_id: m.message_id,
            name: m.name,
            body: m.body,
            active: m.active,
            active_at: m.active_at,
            scheduled_at: m.scheduled_at,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
