use sqlx::SqlitePool;

use crate::core::error::{AppError, Result};
use crate::features::settings::models::User;

/// Service for credential verification
pub struct AuthService {
    pool: SqlitePool,
}

impl AuthService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Verify email/password against the stored bcrypt hash. Returns the
    /// matching active user, or Unauthorized for a wrong email, wrong
    /// password, or deactivated account; the caller cannot tell which.
    pub async fn verify_credentials(&self, email: &str, password: &str) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, name, email, passwd, active, created_at, updated_at
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to look up user by email: {:?}", e);
            AppError::Database(e)
        })?;

        let user = match user {
            Some(u) if u.active == 1 => u,
            _ => return Err(AppError::Unauthorized("Invalid email or password".to_string())),
        };

        let matches = bcrypt::verify(password, &user.passwd)
            .map_err(|e| AppError::Internal(format!("Password verification failed: {}", e)))?;

        if !matches {
            return Err(AppError::Unauthorized("Invalid email or password".to_string()));
        }

        Ok(user)
    }
}
