use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::settings::handlers;
use crate::features::settings::services::{SystemdataService, UserService};

pub fn routes(user_service: Arc<UserService>, systemdata_service: Arc<SystemdataService>) -> Router {
    let profile = Router::new()
        .route(
            "/settings/profile",
            get(handlers::get_profile).post(handlers::update_profile),
        )
        .route("/settings/password", post(handlers::change_password))
        .with_state(user_service);

    let icon = Router::new()
        .route(
            "/settings/icon",
            get(handlers::get_icon).post(handlers::update_icon),
        )
        .with_state(systemdata_service);

    profile.merge(icon)
}
