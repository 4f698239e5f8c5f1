use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::auth::session::SessionUser;

/// Login request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginDto {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Authenticated user as returned to the client (no password material)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionUserDto {
    pub user_id: i64,
    pub name: String,
    pub email: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<SessionUser> for SessionUserDto {
    fn from(u: SessionUser) -> Self {
        Self {
            user_id: u.user_id,
            name: u.name,
            email: u.email,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}
