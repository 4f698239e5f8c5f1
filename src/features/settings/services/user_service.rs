use sqlx::SqlitePool;
use tracing::info;

use crate::core::error::{AppError, Result};
use crate::features::settings::models::User;

/// Password rules applied before hashing: at least 12 characters with at
/// least one uppercase, one lowercase, and one numeric character.
pub fn check_passwd_complexity(password: &str) -> Result<()> {
    if password.is_empty() {
        return Err(AppError::Validation(
            "The password argument is required".to_string(),
        ));
    }
    if password.chars().count() < 12 {
        return Err(AppError::Validation(
            "The password argument must be at least 12 characters".to_string(),
        ));
    }

    let checks = [
        ("uppercase", char::is_uppercase as fn(char) -> bool),
        ("lowercase", char::is_lowercase),
        ("numeric", |c: char| c.is_ascii_digit()),
    ];
    for (label, check) in checks {
        if !password.chars().any(check) {
            return Err(AppError::Validation(format!(
                "The password argument must have at least 1 {label} character"
            )));
        }
    }

    Ok(())
}

/// Service for user account maintenance
pub struct UserService {
    pool: SqlitePool,
}

impl UserService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn get_by_id(&self, user_id: i64) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, name, email, passwd, active, created_at, updated_at
            FROM users
            WHERE user_id = ?
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        user.ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))
    }

    /// Update name and email, returning the fresh row so callers can
    /// refresh the session snapshot.
    pub async fn update_profile(&self, user_id: i64, name: &str, email: &str) -> Result<User> {
        let result = sqlx::query("UPDATE users SET name = ?, email = ? WHERE user_id = ?")
            .bind(name)
            .bind(email)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::Internal("Unable to update profile".to_string()));
        }
        info!(user_id, "profile updated");

        self.get_by_id(user_id).await
    }

    /// Change the password after verifying the old one and checking the
    /// new one against the complexity rules. Returns the fresh row.
    pub async fn change_password(
        &self,
        user_id: i64,
        old_password: &str,
        new_password: &str,
        confirm_new_password: &str,
    ) -> Result<User> {
        let user = self.get_by_id(user_id).await?;

        let old_matches = bcrypt::verify(old_password, &user.passwd)
            .map_err(|e| AppError::Internal(format!("Password verification failed: {}", e)))?;
        if !old_matches {
            return Err(AppError::Unauthorized(
                "The old password was not correct".to_string(),
            ));
        }

        if new_password != confirm_new_password {
            return Err(AppError::Validation(
                "The new and confirm passwords don't match".to_string(),
            ));
        }

        check_passwd_complexity(new_password)?;

        let hash = bcrypt::hash(new_password, bcrypt::DEFAULT_COST)
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;

        let result = sqlx::query("UPDATE users SET passwd = ? WHERE user_id = ?")
            .bind(&hash)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::Internal("Unable to update password".to_string()));
        }
        info!(user_id, "password updated");

        self.get_by_id(user_id).await
    }
}
