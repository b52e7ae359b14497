use std::sync::Arc;

use axum::{
    routing::{get, patch, post, put},
    Router,
};
use sqlx::SqlitePool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

#[cfg(test)]
mod test_support;

use config::Config;

/// Shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: Config) -> Self {
        Self {
            pool,
            config: Arc::new(config),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::authorize,
        handlers::projects::list_projects,
        handlers::projects::create_project,
        handlers::projects::create_section,
        handlers::projects::rename_section,
        handlers::projects::list_labels,
        handlers::projects::create_label,
        handlers::tasks::create_task,
        handlers::tasks::get_tasks,
        handlers::tasks::get_task,
        handlers::tasks::update_task,
        handlers::tasks::delete_task,
        handlers::comments::list_comments,
        handlers::comments::create_comment,
        handlers::comments::update_comment,
        handlers::comments::delete_comment
    ),
    components(
        schemas(
            models::AuthorizedUser,
            models::CreateUser,
            models::LoginRequest,
            models::Token,
            models::Project,
            models::CreateProject,
            models::Section,
            models::SectionTitle,
            models::Label,
            models::CreateLabel,
            models::Priority,
            models::Alarm,
            models::Bookmark,
            models::TaskDetail,
            models::CreateTask,
            models::UpdateTask,
            models::Comment,
            models::CommentBody,
            models::SuccessResponse,
            models::DeleteResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Authentication endpoints"),
        (name = "projects", description = "Projects and sections"),
        (name = "labels", description = "Task labels"),
        (name = "tasks", description = "Task management endpoints"),
        (name = "comments", description = "Comments on a task")
    )
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::Http::new(
                        utoipa::openapi::security::HttpAuthScheme::Bearer,
                    ),
                ),
            );
        }
    }
}

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/user", post(handlers::auth::register))
        .route("/user/login", post(handlers::auth::login))
        .route("/user/authorize", get(handlers::auth::authorize))
        .route(
            "/project",
            get(handlers::projects::list_projects).post(handlers::projects::create_project),
        )
        .route(
            "/project/:project_id/section",
            post(handlers::projects::create_section),
        )
        .route(
            "/project/:project_id/section/:section_id/task",
            post(handlers::tasks::create_task),
        )
        .route("/section/:section_id", patch(handlers::projects::rename_section))
        .route(
            "/label",
            get(handlers::projects::list_labels).post(handlers::projects::create_label),
        )
        .route("/task", get(handlers::tasks::get_tasks))
        .route(
            "/task/:task_id",
            get(handlers::tasks::get_task)
                .patch(handlers::tasks::update_task)
                .delete(handlers::tasks::delete_task),
        )
        .route(
            "/task/:task_id/comment",
            get(handlers::comments::list_comments).post(handlers::comments::create_comment),
        )
        .route(
            "/task/:task_id/comment/:comment_id",
            put(handlers::comments::update_comment).delete(handlers::comments::delete_comment),
        );

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/", get(|| async { "HalgoraeDO backend is running" }))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
