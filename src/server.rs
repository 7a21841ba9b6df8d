use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::api::handler;
use crate::config::AppConfig;
use crate::platform::acc::AccPlatform;
use crate::platform::AdminPlatform;

pub struct AppState {
    pub config: AppConfig,
    pub platform: Arc<dyn AdminPlatform>,
}

impl AppState {
    pub fn new(config: AppConfig) -> crate::error::Result<Self> {
        let platform = AccPlatform::new(&config.aps)?;
        Ok(Self::with_platform(config, Arc::new(platform)))
    }

    pub fn with_platform(config: AppConfig, platform: Arc<dyn AdminPlatform>) -> Self {
        Self { config, platform }
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/api/admin/projects",
            get(handler::list_projects).post(handler::create_projects),
        )
        .route("/api/admin/project", get(handler::get_project))
        .route(
            "/api/admin/project/users",
            get(handler::list_project_users).post(handler::import_project_users),
        )
        .route("/api/admin/batch-assign", post(handler::batch_assign))
        .route(
            "/users/:user_id/assign-projects",
            post(handler::assign_projects),
        )
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "ok"
}
