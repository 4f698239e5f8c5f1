use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::core::error::Result;

const AUTHENTICATED_KEY: &str = "authenticated";
const USER_KEY: &str = "user";
const ALERT_KEY: &str = "alert";

/// Snapshot of the logged-in user kept in the session. Refreshed whenever
/// the underlying user row changes (profile or password updates).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    pub user_id: i64,
    pub name: String,
    pub email: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Flash-style alert carried across one redirect in the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
}

impl Alert {
    pub fn info(message: &str) -> Self {
        Self {
            kind: "info".to_string(),
            message: message.to_string(),
        }
    }

    pub fn danger(message: &str) -> Self {
        Self {
            kind: "danger".to_string(),
            message: message.to_string(),
        }
    }
}

/// The user stored in the session, if the session is authenticated.
pub async fn authenticated_user(session: &Session) -> Result<Option<SessionUser>> {
    if session.get::<bool>(AUTHENTICATED_KEY).await? != Some(true) {
        return Ok(None);
    }

    Ok(session.get::<SessionUser>(USER_KEY).await?)
}

/// Mark the session authenticated for `user`, rotating the session id so a
/// pre-login cookie can't be replayed.
pub async fn establish(session: &Session, user: SessionUser) -> Result<()> {
    session.cycle_id().await?;
    session.insert(AUTHENTICATED_KEY, true).await?;
    session.insert(USER_KEY, user).await?;
    Ok(())
}

/// Replace the user snapshot after a profile or password change.
pub async fn refresh_user(session: &Session, user: SessionUser) -> Result<()> {
    session.insert(USER_KEY, user).await?;
    Ok(())
}

/// Drop everything from the session (logout, failed login).
pub async fn empty(session: &Session) -> Result<()> {
    session.flush().await?;
    Ok(())
}

pub async fn set_alert(session: &Session, alert: Alert) -> Result<()> {
    session.insert(ALERT_KEY, alert).await?;
    Ok(())
}

/// Take the pending alert, if any; reading consumes it.
pub async fn take_alert(session: &Session) -> Result<Option<Alert>> {
    Ok(session.remove::<Alert>(ALERT_KEY).await?)
}
