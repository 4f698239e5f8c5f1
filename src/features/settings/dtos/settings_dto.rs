use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::settings::models::User;

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateProfileDto {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Response DTO for the profile; never carries password material.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProfileResponseDto {
    pub user_id: i64,
    pub name: String,
    pub email: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<User> for ProfileResponseDto {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ChangePasswordDto {
    pub old_password: Option<String>,
    pub new_password: Option<String>,
    pub confirm_new_password: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateIconDto {
    pub icon: Option<String>,
}

/// The currently selected icon plus the catalog to choose from.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IconResponseDto {
    pub checked: String,
    pub icons: Vec<String>,
}
