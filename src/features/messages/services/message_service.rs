use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

use crate::core::error::{AppError, Result};
use crate::features::messages::dtos::{CreateMessageDto, UpdateMessageDto};
use crate::features::messages::models::Message;
use crate::shared::datetime;

/// Result of an update request after diffing against the stored row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Applied,
    NoChange,
}

/// Column-level diff between a stored message and an update request.
///
/// The outer `Option` means "write this column"; the inner `Option` on the
/// datetime columns carries the new value or NULL.
#[derive(Debug, Default, PartialEq, Eq)]
struct MessageChanges {
    name: Option<String>,
    body: Option<String>,
    active: Option<i64>,
    active_at: Option<Option<String>>,
    scheduled_at: Option<Option<String>>,
}

impl MessageChanges {
    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.body.is_none()
            && self.active.is_none()
            && self.active_at.is_none()
            && self.scheduled_at.is_none()
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Diffs an update request against the stored row.
///
/// Activation wins over scheduling: when `active` is true the schedule
/// fields are ignored and any stored schedule is cleared. When the flag is
/// absent or false an active row is deactivated. A schedule is only
/// written when both date and time are supplied and the combined datetime
/// lies in the future of `now`; supplying neither clears a stored
/// schedule, supplying exactly one changes nothing.
fn compute_changes(stored: &Message, dto: &UpdateMessageDto, now: &str) -> Result<MessageChanges> {
    let mut changes = MessageChanges::default();

    if let Some(name) = present(&dto.name) {
        if name != stored.name {
            changes.name = Some(name.to_string());
        }
    }
    if let Some(body) = present(&dto.body) {
        if body != stored.body {
            changes.body = Some(body.to_string());
        }
    }

    let activate = dto.active == Some(true);
    if activate {
        if stored.active == 0 {
            changes.active = Some(1);
            changes.active_at = Some(Some(now.to_string()));
        }
        if stored.scheduled_at.is_some() {
            changes.scheduled_at = Some(None);
        }
        return Ok(changes);
    }

    if stored.active == 1 {
        changes.active = Some(0);
        changes.active_at = Some(None);
    }

    match (present(&dto.schedule_date), present(&dto.schedule_time)) {
        (Some(date), Some(time)) => {
            let candidate = format!("{date} {time}");
            if stored.scheduled_at.as_deref() != Some(candidate.as_str()) {
                if !datetime::is_future(&candidate, now)? {
                    return Err(AppError::Validation(
                        "scheduled_at must be in the future".to_string(),
                    ));
                }
                changes.scheduled_at = Some(Some(candidate));
            }
        }
        (None, None) => {
            if stored.scheduled_at.is_some() {
                changes.scheduled_at = Some(None);
            }
        }
        // Half a schedule is not actionable; leave the stored value alone.
        _ => {}
    }

    Ok(changes)
}

/// Service handling the message lifecycle
#[derive(Clone)]
pub struct MessageService {
    pool: SqlitePool,
}

impl MessageService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Current datetime according to the database, so that scheduling
    /// comparisons and `active_at` stamps share one reference clock.
    async fn localtime(&self) -> Result<String> {
        let now = sqlx::query_scalar::<_, String>("SELECT datetime('now', 'localtime')")
            .fetch_one(&self.pool)
            .await?;
        Ok(now)
    }

    /// Lists all messages, active first, then soonest schedule first,
    /// then most recently updated.
    pub async fn list(&self) -> Result<Vec<Message>> {
        let messages = sqlx::query_as::<_, Message>(
            r#"
            SELECT message_id, name, body, active, active_at, scheduled_at,
                   created_at, updated_at
            FROM messages
            ORDER BY active DESC,
                     CASE WHEN active_at IS NULL THEN 1 ELSE 0 END, active_at ASC,
                     CASE WHEN scheduled_at IS NULL THEN 1 ELSE 0 END, scheduled_at ASC,
                     updated_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(messages)
    }

    pub async fn get(&self, message_id: i64) -> Result<Message> {
        let message = sqlx::query_as::<_, Message>(
            r#"
            SELECT message_id, name, body, active, active_at, scheduled_at,
                   created_at, updated_at
            FROM messages
            WHERE message_id = ?
            "#,
        )
        .bind(message_id)
        .fetch_optional(&self.pool)
        .await?;

        message.ok_or_else(|| AppError::NotFound(format!("Message {message_id} not found")))
    }

    /// Creates a message. An active message activates immediately and any
    /// schedule input is ignored; otherwise a complete, future schedule is
    /// stored verbatim.
    pub async fn create(&self, dto: CreateMessageDto) -> Result<i64> {
        let (Some(name), Some(body)) = (present(&dto.name), present(&dto.body)) else {
            return Err(AppError::Validation(
                "The name and body parameters are required".to_string(),
            ));
        };

        let mut active = 0i64;
        let mut active_at: Option<String> = None;
        let mut scheduled_at: Option<String> = None;

        if dto.active == Some(true) {
            active = 1;
            active_at = Some(self.localtime().await?);
        } else if let (Some(date), Some(time)) =
            (present(&dto.schedule_date), present(&dto.schedule_time))
        {
            let candidate = format!("{date} {time}");
            let now = self.localtime().await?;
            if !datetime::is_future(&candidate, &now)? {
                return Err(AppError::Validation(
                    "scheduled_at must be in the future".to_string(),
                ));
            }
            scheduled_at = Some(candidate);
        }

        let result = sqlx::query(
            r#"
            INSERT INTO messages (name, body, active, active_at, scheduled_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(name)
        .bind(body)
        .bind(active)
        .bind(&active_at)
        .bind(&scheduled_at)
        .execute(&self.pool)
        .await?;

        let message_id = result.last_insert_rowid();
        debug!(message_id, active, "message created");

        Ok(message_id)
    }

    /// Applies an update as a minimal diff against the stored row.
    /// Returns [`UpdateOutcome::NoChange`] without touching the database
    /// when the request changes nothing.
    pub async fn update(&self, message_id: i64, dto: UpdateMessageDto) -> Result<UpdateOutcome> {
        let stored = self.get(message_id).await?;
        let now = self.localtime().await?;
        let changes = compute_changes(&stored, &dto, &now)?;

        if changes.is_empty() {
            debug!(message_id, "message update changed nothing");
            return Ok(UpdateOutcome::NoChange);
        }

        let mut builder = QueryBuilder::<Sqlite>::new("UPDATE messages SET ");
        let mut assignments = builder.separated(", ");
        if let Some(name) = &changes.name {
            assignments.push("name = ").push_bind_unseparated(name);
        }
        if let Some(body) = &changes.body {
            assignments.push("body = ").push_bind_unseparated(body);
        }
        if let Some(active) = changes.active {
            assignments.push("active = ").push_bind_unseparated(active);
        }
        if let Some(active_at) = &changes.active_at {
            assignments
                .push("active_at = ")
                .push_bind_unseparated(active_at);
        }
        if let Some(scheduled_at) = &changes.scheduled_at {
            assignments
                .push("scheduled_at = ")
                .push_bind_unseparated(scheduled_at);
        }
        builder.push(" WHERE message_id = ").push_bind(message_id);

        builder.build().execute(&self.pool).await?;
        debug!(message_id, "message updated");

        Ok(UpdateOutcome::Applied)
    }

    pub async fn delete(&self, message_id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM messages WHERE message_id = ?")
            .bind(message_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Message {message_id} not found"
            )));
        }
        debug!(message_id, "message deleted");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::test_pool;

    fn stored(active: i64, active_at: Option<&str>, scheduled_at: Option<&str>) -> Message {
        Message {
            message_id: 1,
            name: "maintenance".to_string(),
            body: "Down for maintenance".to_string(),
            active,
            active_at: active_at.map(String::from),
            scheduled_at: scheduled_at.map(String::from),
            created_at: "2026-01-01 00:00:00".to_string(),
            updated_at: "2026-01-01 00:00:00".to_string(),
        }
    }

    const NOW: &str = "2026-06-01 12:00:00";

    #[test]
    fn diff_is_empty_for_identical_values() {
        let dto = UpdateMessageDto {
            name: Some("maintenance".to_string()),
            body: Some("Down for maintenance".to_string()),
            ..Default::default()
        };
        let changes = compute_changes(&stored(0, None, None), &dto, NOW).unwrap();
        assert!(changes.is_empty());
    }

    #[test]
    fn diff_picks_up_changed_text_fields() {
        let dto = UpdateMessageDto {
            name: Some("outage".to_string()),
            body: Some("Down for maintenance".to_string()),
            ..Default::default()
        };
        let changes = compute_changes(&stored(0, None, None), &dto, NOW).unwrap();
        assert_eq!(changes.name.as_deref(), Some("outage"));
        assert!(changes.body.is_none());
    }

    #[test]
    fn activation_stamps_active_at_and_clears_schedule() {
        let dto = UpdateMessageDto {
            active: Some(true),
            schedule_date: Some("2026-12-31".to_string()),
            schedule_time: Some("23:59:59".to_string()),
            ..Default::default()
        };
        let changes =
            compute_changes(&stored(0, None, Some("2026-07-01 00:00:00")), &dto, NOW).unwrap();
        assert_eq!(changes.active, Some(1));
        assert_eq!(changes.active_at, Some(Some(NOW.to_string())));
        // Schedule input is ignored while activating; the stored one goes away.
        assert_eq!(changes.scheduled_at, Some(None));
    }

    #[test]
    fn activating_an_active_row_changes_nothing() {
        let dto = UpdateMessageDto {
            active: Some(true),
            ..Default::default()
        };
        let changes = compute_changes(&stored(1, Some("2026-05-01 08:00:00"), None), &dto, NOW)
            .unwrap();
        assert!(changes.is_empty());
    }

    #[test]
    fn absent_flag_deactivates_an_active_row() {
        let dto = UpdateMessageDto::default();
        let changes = compute_changes(&stored(1, Some("2026-05-01 08:00:00"), None), &dto, NOW)
            .unwrap();
        assert_eq!(changes.active, Some(0));
        assert_eq!(changes.active_at, Some(None));
    }

    #[test]
    fn future_schedule_is_written() {
        let dto = UpdateMessageDto {
            schedule_date: Some("2026-06-02".to_string()),
            schedule_time: Some("09:00:00".to_string()),
            ..Default::default()
        };
        let changes = compute_changes(&stored(0, None, None), &dto, NOW).unwrap();
        assert_eq!(
            changes.scheduled_at,
            Some(Some("2026-06-02 09:00:00".to_string()))
        );
    }

    #[test]
    fn past_schedule_is_rejected() {
        let dto = UpdateMessageDto {
            schedule_date: Some("2026-05-31".to_string()),
            schedule_time: Some("09:00:00".to_string()),
            ..Default::default()
        };
        let err = compute_changes(&stored(0, None, None), &dto, NOW).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn schedule_equal_to_now_is_rejected() {
        let dto = UpdateMessageDto {
            schedule_date: Some("2026-06-01".to_string()),
            schedule_time: Some("12:00:00".to_string()),
            ..Default::default()
        };
        let err = compute_changes(&stored(0, None, None), &dto, NOW).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn omitting_both_schedule_fields_clears_a_stored_schedule() {
        let dto = UpdateMessageDto::default();
        let changes =
            compute_changes(&stored(0, None, Some("2026-07-01 00:00:00")), &dto, NOW).unwrap();
        assert_eq!(changes.scheduled_at, Some(None));
    }

    #[test]
    fn half_a_schedule_changes_nothing() {
        let dto = UpdateMessageDto {
            schedule_date: Some("2026-06-02".to_string()),
            ..Default::default()
        };
        let changes =
            compute_changes(&stored(0, None, Some("2026-07-01 00:00:00")), &dto, NOW).unwrap();
        assert!(changes.is_empty());
    }

    #[test]
    fn unchanged_schedule_skips_the_future_check() {
        // Re-submitting a schedule that has meanwhile passed must not fail.
        let dto = UpdateMessageDto {
            schedule_date: Some("2026-05-01".to_string()),
            schedule_time: Some("09:00:00".to_string()),
            ..Default::default()
        };
        let changes =
            compute_changes(&stored(0, None, Some("2026-05-01 09:00:00")), &dto, NOW).unwrap();
        assert!(changes.is_empty());
    }

    #[tokio::test]
    async fn create_requires_name_and_body() {
        let service = MessageService::new(test_pool().await);
        let err = service
            .create(CreateMessageDto {
                name: Some("maintenance".to_string()),
                body: Some(String::new()),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn create_active_ignores_schedule_input() {
        let service = MessageService::new(test_pool().await);
        let id = service
            .create(CreateMessageDto {
                name: Some("maintenance".to_string()),
                body: Some("Down for maintenance".to_string()),
                active: Some(true),
                schedule_date: Some("2099-01-01".to_string()),
                schedule_time: Some("00:00:00".to_string()),
            })
            .await
            .unwrap();

        let message = service.get(id).await.unwrap();
        assert_eq!(message.active, 1);
        assert!(message.active_at.is_some());
        assert!(message.scheduled_at.is_none());
    }

    #[tokio::test]
    async fn create_stores_a_future_schedule() {
        let service = MessageService::new(test_pool().await);
        let id = service
            .create(CreateMessageDto {
                name: Some("maintenance".to_string()),
                body: Some("Down for maintenance".to_string()),
                schedule_date: Some("2099-01-01".to_string()),
                schedule_time: Some("00:00:00".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        let message = service.get(id).await.unwrap();
        assert_eq!(message.active, 0);
        assert!(message.active_at.is_none());
        assert_eq!(message.scheduled_at.as_deref(), Some("2099-01-01 00:00:00"));
    }

    #[tokio::test]
    async fn create_rejects_a_past_schedule() {
        let service = MessageService::new(test_pool().await);
        let err = service
            .create(CreateMessageDto {
                name: Some("maintenance".to_string()),
                body: Some("Down for maintenance".to_string()),
                schedule_date: Some("2000-01-01".to_string()),
                schedule_time: Some("00:00:00".to_string()),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_with_identical_values_is_no_change() {
        let service = MessageService::new(test_pool().await);
        let id = service
            .create(CreateMessageDto {
                name: Some("maintenance".to_string()),
                body: Some("Down for maintenance".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        let outcome = service
            .update(
                id,
                UpdateMessageDto {
                    name: Some("maintenance".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(outcome, UpdateOutcome::NoChange);
    }

    #[tokio::test]
    async fn update_activates_and_clears_the_schedule() {
        let service = MessageService::new(test_pool().await);
        let id = service
            .create(CreateMessageDto {
                name: Some("maintenance".to_string()),
                body: Some("Down for maintenance".to_string()),
                schedule_date: Some("2099-01-01".to_string()),
                schedule_time: Some("00:00:00".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        let outcome = service
            .update(
                id,
                UpdateMessageDto {
                    active: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(outcome, UpdateOutcome::Applied);

        let message = service.get(id).await.unwrap();
        assert_eq!(message.active, 1);
        assert!(message.active_at.is_some());
        assert!(message.scheduled_at.is_none());
    }

    #[tokio::test]
    async fn update_without_the_flag_deactivates() {
        let service = MessageService::new(test_pool().await);
        let id = service
            .create(CreateMessageDto {
                name: Some("maintenance".to_string()),
                body: Some("Down for maintenance".to_string()),
                active: Some(true),
                ..Default::default()
            })
            .await
            .unwrap();

        let outcome = service
            .update(
                id,
                UpdateMessageDto {
                    body: Some("Back online".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(outcome, UpdateOutcome::Applied);

        let message = service.get(id).await.unwrap();
        assert_eq!(message.active, 0);
        assert!(message.active_at.is_none());
        assert_eq!(message.body, "Back online");
    }

    #[tokio::test]
    async fn update_rejects_a_past_schedule_and_leaves_the_row_alone() {
        let service = MessageService::new(test_pool().await);
        let id = service
            .create(CreateMessageDto {
                name: Some("maintenance".to_string()),
                body: Some("Down for maintenance".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        let err = service
            .update(
                id,
                UpdateMessageDto {
                    name: Some("outage".to_string()),
                    schedule_date: Some("2000-01-01".to_string()),
                    schedule_time: Some("00:00:00".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let message = service.get(id).await.unwrap();
        assert_eq!(message.name, "maintenance");
        assert!(message.scheduled_at.is_none());
    }

    #[tokio::test]
    async fn delete_removes_the_row() {
        let service = MessageService::new(test_pool().await);
        let id = service
            .create(CreateMessageDto {
                name: Some("maintenance".to_string()),
                body: Some("Down for maintenance".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        service.delete(id).await.unwrap();
        let err = service.get(id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_of_a_missing_row_is_not_found() {
        let service = MessageService::new(test_pool().await);
        let err = service.delete(4711).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn list_puts_active_messages_first() {
        let service = MessageService::new(test_pool().await);
        let scheduled = service
            .create(CreateMessageDto {
                name: Some("upgrade".to_string()),
                body: Some("Upgrade window".to_string()),
                schedule_date: Some("2099-01-01".to_string()),
                schedule_time: Some("00:00:00".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        let active = service
            .create(CreateMessageDto {
                name: Some("maintenance".to_string()),
                body: Some("Down for maintenance".to_string()),
                active: Some(true),
                ..Default::default()
            })
            .await
            .unwrap();

        let messages = service.list().await.unwrap();
        let ids: Vec<i64> = messages.iter().map(|m| m.message_id).collect();
        assert_eq!(ids, vec![active, scheduled]);
    }
}
