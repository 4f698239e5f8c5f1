use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request DTO for creating a message.
///
/// `active` is a JSON boolean; the storage representation (0/1) is a
/// service concern. `schedule_date`/`schedule_time` are only honored when
/// both are present and the message is not being activated.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateMessageDto {
    pub name: Option<String>,
    pub body: Option<String>,
    pub active: Option<bool>,
    /// `YYYY-MM-DD`
    pub schedule_date: Option<String>,
    /// `HH:MM:SS`
    pub schedule_time: Option<String>,
}

/// Request DTO for updating a message; every field is optional and only
/// fields that differ from the stored row become part of the update.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateMessageDto {
    pub name: Option<String>,
    pub body: Option<String>,
    pub active: Option<bool>,
    /// `YYYY-MM-DD`
    pub schedule_date: Option<String>,
    /// `HH:MM:SS`
    pub schedule_time: Option<String>,
}

/// Response DTO for a message
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponseDto {
    pub message_id: i64,
    pub name: String,
    pub body: String,
    /// 0/1 at the storage boundary
    pub active: i64,
    pub active_at: Option<String>,
    pub scheduled_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Response DTO for a newly created message
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatedMessageDto {
    pub message_id: i64,
}
