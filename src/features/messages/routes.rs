use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::messages::handlers;
use crate::features::messages::services::MessageService;

pub fn routes(service: Arc<MessageService>) -> Router {
    Router::new()
        .route(
            "/api/message",
            get(handlers::list_messages).post(handlers::create_message),
        )
        .route(
            "/api/message/{message_id}",
            get(handlers::get_message)
                .post(handlers::update_message)
                .delete(handlers::delete_message),
        )
        .with_state(service)
}
