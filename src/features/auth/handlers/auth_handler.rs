use std::sync::Arc;

use axum::{
    extract::State,
    response::Redirect,
    Json,
};
use tower_sessions::Session;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::dtos::{LoginDto, SessionUserDto};
use crate::features::auth::services::AuthService;
use crate::features::auth::session::{self, Alert};
use crate::shared::types::ApiResponse;

/// Pending flash alert for the login page, if any. Reading consumes it.
pub async fn login_page(session: Session) -> Result<Json<ApiResponse<Alert>>> {
    let alert = session::take_alert(&session).await?;
    Ok(Json(ApiResponse::success(alert, None)))
}

/// Log in with email and password
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginDto,
    responses(
        (status = 200, description = "Session established", body = ApiResponse<SessionUserDto>),
        (status = 400, description = "Missing email or password"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "auth"
)]
pub async fn login(
    State(service): State<Arc<AuthService>>,
    session: Session,
    AppJson(dto): AppJson<LoginDto>,
) -> Result<Json<ApiResponse<SessionUserDto>>> {
    let (email, password) = match (dto.email.as_deref(), dto.password.as_deref()) {
        (Some(e), Some(p)) if !e.is_empty() && !p.is_empty() => (e, p),
        _ => {
            return Err(AppError::Validation(
                "The email and password parameters are required".to_string(),
            ))
        }
    };

    let user = match service.verify_credentials(email, password).await {
        Ok(user) => user,
        Err(e) => {
            // A failed attempt must not keep any prior session state.
            session::empty(&session).await?;
            return Err(e);
        }
    };

    let session_user = user.to_session_user();
    session::establish(&session, session_user.clone()).await?;

    tracing::info!("User {} logged in", session_user.user_id);

    Ok(Json(ApiResponse::success(
        Some(session_user.into()),
        Some("OK".to_string()),
    )))
}

/// Log out and return to the login page
#[utoipa::path(
    get,
    path = "/logout",
    responses(
        (status = 303, description = "Session cleared, redirected to login")
    ),
    tag = "auth"
)]
pub async fn logout(session: Session) -> Result<Redirect> {
    session::empty(&session).await?;
    session::set_alert(&session, Alert::info("You've been logged out")).await?;
    Ok(Redirect::to("/login"))
}
