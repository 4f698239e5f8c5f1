use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::messages::dtos::{
    CreateMessageDto, CreatedMessageDto, MessageResponseDto, UpdateMessageDto,
};
use crate::features::messages::services::{MessageService, UpdateOutcome};
use crate::shared::html::replace_newlines;
use crate::shared::types::ApiResponse;

/// List all messages
#[utoipa::path(
    get,
    path = "/api/message",
    responses(
        (status = 200, description = "All messages, active first", body = ApiResponse<Vec<MessageResponseDto>>),
        (status = 401, description = "Not authenticated")
    ),
    tag = "messages"
)]
pub async fn list_messages(
    State(service): State<Arc<MessageService>>,
) -> Result<Json<ApiResponse<Vec<MessageResponseDto>>>> {
    let messages = service
        .list()
        .await?
        .into_iter()
        .map(|mut m| {
            // The overview renders bodies as HTML.
            m.body = replace_newlines(&m.body);
            MessageResponseDto::from(m)
        })
        .collect();

    Ok(Json(ApiResponse::success(Some(messages), None)))
}

/// Get a single message
#[utoipa::path(
    get,
    path = "/api/message/{message_id}",
    params(("message_id" = i64, Path, description = "Message id")),
    responses(
        (status = 200, description = "The message", body = ApiResponse<MessageResponseDto>),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "No such message")
    ),
    tag = "messages"
)]
pub async fn get_message(
    State(service): State<Arc<MessageService>>,
    Path(message_id): Path<i64>,
) -> Result<Json<ApiResponse<MessageResponseDto>>> {
    let message = service.get(message_id).await?;
    Ok(Json(ApiResponse::success(Some(message.into()), None)))
}

/// Create a message
#[utoipa::path(
    post,
    path = "/api/message",
    request_body = CreateMessageDto,
    responses(
        (status = 200, description = "Message created", body = ApiResponse<CreatedMessageDto>),
        (status = 400, description = "Missing fields or invalid schedule"),
        (status = 401, description = "Not authenticated")
    ),
    tag = "messages"
)]
pub async fn create_message(
    State(service): State<Arc<MessageService>>,
    AppJson(dto): AppJson<CreateMessageDto>,
) -> Result<Json<ApiResponse<CreatedMessageDto>>> {
    let message_id = service.create(dto).await?;
    Ok(Json(ApiResponse::success(
        Some(CreatedMessageDto { message_id }),
        Some("OK".to_string()),
    )))
}

/// Update a message; a request that changes nothing yields 204.
#[utoipa::path(
    post,
    path = "/api/message/{message_id}",
    params(("message_id" = i64, Path, description = "Message id")),
    request_body = UpdateMessageDto,
    responses(
        (status = 200, description = "Message updated"),
        (status = 204, description = "Nothing to update"),
        (status = 400, description = "Invalid schedule"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "No such message")
    ),
    tag = "messages"
)]
pub async fn update_message(
    State(service): State<Arc<MessageService>>,
    Path(message_id): Path<i64>,
    AppJson(dto): AppJson<UpdateMessageDto>,
) -> Result<Response> {
    match service.update(message_id, dto).await? {
        UpdateOutcome::Applied => Ok(Json(ApiResponse::<()>::success(
            None,
            Some("OK".to_string()),
        ))
        .into_response()),
        UpdateOutcome::NoChange => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}

/// Delete a message
#[utoipa::path(
    delete,
    path = "/api/message/{message_id}",
    params(("message_id" = i64, Path, description = "Message id")),
    responses(
        (status = 200, description = "Message deleted"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "No such message")
    ),
    tag = "messages"
)]
pub async fn delete_message(
    State(service): State<Arc<MessageService>>,
    Path(message_id): Path<i64>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(message_id).await?;
    Ok(Json(ApiResponse::success(None, Some("OK".to_string()))))
}
