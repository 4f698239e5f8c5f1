use utoipa::{Modify, OpenApi};

use crate::features::auth::{dtos as auth_dtos, handlers as auth_handlers};
use crate::features::messages::{dtos as messages_dtos, handlers as messages_handlers};
use crate::features::settings::{dtos as settings_dtos, handlers as settings_handlers};
use crate::shared::types::ApiResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth_handlers::login,
        auth_handlers::logout,
        // Messages
        messages_handlers::list_messages,
        messages_handlers::get_message,
        messages_handlers::create_message,
        messages_handlers::update_message,
        messages_handlers::delete_message,
        // Settings
        settings_handlers::get_profile,
        settings_handlers::update_profile,
        settings_handlers::change_password,
        settings_handlers::get_icon,
        settings_handlers::update_icon,
    ),
    components(
        schemas(
            // Auth
            auth_dtos::LoginDto,
            auth_dtos::SessionUserDto,
            ApiResponse<auth_dtos::SessionUserDto>,
            // Messages
            messages_dtos::CreateMessageDto,
            messages_dtos::UpdateMessageDto,
            messages_dtos::MessageResponseDto,
            messages_dtos::CreatedMessageDto,
            ApiResponse<Vec<messages_dtos::MessageResponseDto>>,
            ApiResponse<messages_dtos::MessageResponseDto>,
            ApiResponse<messages_dtos::CreatedMessageDto>,
            // Settings
            settings_dtos::UpdateProfileDto,
            settings_dtos::ProfileResponseDto,
            settings_dtos::ChangePasswordDto,
            settings_dtos::UpdateIconDto,
            settings_dtos::IconResponseDto,
            ApiResponse<settings_dtos::ProfileResponseDto>,
            ApiResponse<settings_dtos::IconResponseDto>,
        )
    ),
    tags(
        (name = "auth", description = "Session authentication"),
        (name = "messages", description = "Announcement messages (immediate or scheduled)"),
        (name = "settings", description = "Account and product settings"),
    ),
    info(
        title = "Hirgon API",
        version = "0.1.0",
        description = "API documentation for Hirgon",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
