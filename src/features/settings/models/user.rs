use sqlx::FromRow;

use crate::features::auth::session::SessionUser;

/// Database model for a user account
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub user_id: i64,
    pub name: String,
    pub email: String,
    pub passwd: String,
    pub active: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl User {
    /// Session snapshot of this user; password material never enters the
    /// session.
    pub fn to_session_user(&self) -> SessionUser {
        SessionUser {
            user_id: self.user_id,
            name: self.name.clone(),
            email: self.email.clone(),
            created_at: self.created_at.clone(),
            updated_at: self.updated_at.clone(),
        }
    }
}
