use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers::{list_users, upload_profile_image};
use crate::ports::services::ProfileService;

/// Application state containing all services
#[derive(Clone)]
pub struct AppState {
    pub profile_service: Arc<dyn ProfileService>,
}

impl AppState {
    pub fn new(profile_service: Arc<dyn ProfileService>) -> Self {
        Self { profile_service }
    }
}

/// Create the main application router with all endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", create_profile_router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Create a router with just the profile operations
pub fn create_profile_router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/{user_id}/image", post(upload_profile_image))
}
