use std::sync::Arc;

use axum::{extract::State, Json};
use tower_sessions::Session;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::session::{self, SessionUser};
use crate::features::settings::dtos::{
    ChangePasswordDto, IconResponseDto, ProfileResponseDto, UpdateIconDto, UpdateProfileDto,
};
use crate::features::settings::services::{SystemdataService, UserService};
use crate::shared::constants::ICONS;
use crate::shared::types::ApiResponse;

/// Profile of the logged-in user
#[utoipa::path(
    get,
    path = "/settings/profile",
    responses(
        (status = 200, description = "Current profile", body = ApiResponse<ProfileResponseDto>),
        (status = 401, description = "Not authenticated")
    ),
    tag = "settings"
)]
pub async fn get_profile(
    State(service): State<Arc<UserService>>,
    user: SessionUser,
) -> Result<Json<ApiResponse<ProfileResponseDto>>> {
    let user = service.get_by_id(user.user_id).await?;
    Ok(Json(ApiResponse::success(Some(user.into()), None)))
}

/// Update name and email
#[utoipa::path(
    post,
    path = "/settings/profile",
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Profile updated", body = ApiResponse<ProfileResponseDto>),
        (status = 400, description = "Missing name or email"),
        (status = 401, description = "Not authenticated")
    ),
    tag = "settings"
)]
pub async fn update_profile(
    State(service): State<Arc<UserService>>,
    session: Session,
    user: SessionUser,
    AppJson(dto): AppJson<UpdateProfileDto>,
) -> Result<Json<ApiResponse<ProfileResponseDto>>> {
    let (name, email) = match (dto.name.as_deref(), dto.email.as_deref()) {
        (Some(n), Some(e)) if !n.is_empty() && !e.is_empty() => (n, e),
        _ => {
            return Err(AppError::Validation(
                "The name and email parameters are required".to_string(),
            ))
        }
    };

    let updated = service.update_profile(user.user_id, name, email).await?;
    // The session snapshot is read by other handlers; keep it current.
    session::refresh_user(&session, updated.to_session_user()).await?;

    Ok(Json(ApiResponse::success(
        Some(updated.into()),
        Some("Profile updated".to_string()),
    )))
}

/// Change the password
#[utoipa::path(
    post,
    path = "/settings/password",
    request_body = ChangePasswordDto,
    responses(
        (status = 200, description = "Password updated"),
        (status = 400, description = "Missing fields, mismatch, or weak password"),
        (status = 401, description = "Not authenticated or wrong old password")
    ),
    tag = "settings"
)]
pub async fn change_password(
    State(service): State<Arc<UserService>>,
    session: Session,
    user: SessionUser,
    AppJson(dto): AppJson<ChangePasswordDto>,
) -> Result<Json<ApiResponse<()>>> {
    let (old, new, confirm) = match (
        dto.old_password.as_deref(),
        dto.new_password.as_deref(),
        dto.confirm_new_password.as_deref(),
    ) {
        (Some(o), Some(n), Some(c)) if !o.is_empty() && !n.is_empty() && !c.is_empty() => {
            (o, n, c)
        }
        _ => {
            return Err(AppError::Validation(
                "The old, new, and confirm passwords are required".to_string(),
            ))
        }
    };

    let updated = service
        .change_password(user.user_id, old, new, confirm)
        .await?;
    session::refresh_user(&session, updated.to_session_user()).await?;

    Ok(Json(ApiResponse::success(
        None,
        Some("Password updated".to_string()),
    )))
}

/// Current site icon plus the catalog to choose from
#[utoipa::path(
    get,
    path = "/settings/icon",
    responses(
        (status = 200, description = "Selected icon and catalog", body = ApiResponse<IconResponseDto>),
        (status = 401, description = "Not authenticated")
    ),
    tag = "settings"
)]
pub async fn get_icon(
    State(service): State<Arc<SystemdataService>>,
) -> Result<Json<ApiResponse<IconResponseDto>>> {
    let checked = service.get_icon().await?;
    Ok(Json(ApiResponse::success(
        Some(IconResponseDto {
            checked,
            icons: ICONS.iter().map(|i| i.to_string()).collect(),
        }),
        None,
    )))
}

/// Change the site icon
#[utoipa::path(
    post,
    path = "/settings/icon",
    request_body = UpdateIconDto,
    responses(
        (status = 200, description = "Icon updated", body = ApiResponse<IconResponseDto>),
        (status = 400, description = "Missing icon"),
        (status = 401, description = "Not authenticated")
    ),
    tag = "settings"
)]
pub async fn update_icon(
    State(service): State<Arc<SystemdataService>>,
    AppJson(dto): AppJson<UpdateIconDto>,
) -> Result<Json<ApiResponse<IconResponseDto>>> {
    let icon = match dto.icon.as_deref() {
        Some(i) if !i.is_empty() => i,
        _ => return Err(AppError::Validation("Icon is required".to_string())),
    };

    service.update_icon(icon).await?;

    Ok(Json(ApiResponse::success(
        Some(IconResponseDto {
            checked: icon.to_string(),
            icons: ICONS.iter().map(|i| i.to_string()).collect(),
        }),
        Some("Icon updated".to_string()),
    )))
}
