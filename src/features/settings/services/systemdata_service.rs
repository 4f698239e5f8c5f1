use sqlx::SqlitePool;
use tracing::info;

use crate::core::error::{AppError, Result};
use crate::shared::constants::SYSTEMDATA_ICON_KEY;

/// Service for site-wide key/value settings
pub struct SystemdataService {
    pool: SqlitePool,
}

impl SystemdataService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// The configured site icon. The row is seeded by the migrations, so a
    /// missing row is a deployment fault rather than a user error.
    pub async fn get_icon(&self) -> Result<String> {
        let value = sqlx::query_scalar::<_, String>("SELECT value FROM systemdata WHERE key = ?")
            .bind(SYSTEMDATA_ICON_KEY)
            .fetch_optional(&self.pool)
            .await?;

        value.ok_or_else(|| AppError::Internal("Icon was not found".to_string()))
    }

    pub async fn update_icon(&self, icon: &str) -> Result<()> {
        let result = sqlx::query("UPDATE systemdata SET value = ? WHERE key = ?")
            .bind(icon)
            .bind(SYSTEMDATA_ICON_KEY)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::Internal("Icon was not found".to_string()));
        }
        info!(icon, "site icon updated");

        Ok(())
    }
}
