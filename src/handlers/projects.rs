use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    error::AppError,
    middleware::CurrentUser,
    models::{CreateLabel, CreateProject, Label, Project, Section, SectionTitle, SuccessResponse},
    services::project,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/project",
    responses(
        (status = 200, description = "Projects created by the current user", body = Vec<Project>)
    ),
    security(
        ("bearer" = [])
    ),
    tag = "projects"
)]
pub async fn list_projects(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<Project>>, AppError> {
    Ok(Json(project::list_projects(&state.pool, user.id).await?))
}

#[utoipa::path(
    post,
    path = "/api/project",
    request_body = CreateProject,
    responses(
        (status = 200, description = "Project created", body = Project),
        (status = 400, description = "Empty title")
    ),
    security(
        ("bearer" = [])
    ),
    tag = "projects"
)]
pub async fn create_project(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<CreateProject>,
) -> Result<Json<Project>, AppError> {
    Ok(Json(
        project::create_project(&state.pool, user.id, &payload.title).await?,
    ))
}

#[utoipa::path(
    post,
    path = "/api/project/{projectId}/section",
    params(
        ("projectId" = i64, Path, description = "Project ID")
    ),
    request_body = SectionTitle,
    responses(
        (status = 200, description = "Section created", body = Section),
        (status = 403, description = "Not the project owner"),
        (status = 404, description = "Project not found")
    ),
    security(
        ("bearer" = [])
    ),
    tag = "projects"
)]
pub async fn create_section(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(project_id): Path<i64>,
    Json(payload): Json<SectionTitle>,
) -> Result<Json<Section>, AppError> {
    Ok(Json(
        project::create_section(&state.pool, project_id, user.id, &payload.title).await?,
    ))
}

#[utoipa::path(
    patch,
    path = "/api/section/{sectionId}",
    params(
        ("sectionId" = i64, Path, description = "Section ID")
    ),
    request_body = SectionTitle,
    responses(
        (status = 200, description = "Section renamed", body = SuccessResponse),
        (status = 403, description = "Not the project owner"),
        (status = 404, description = "Section not found")
    ),
    security(
        ("bearer" = [])
    ),
    tag = "projects"
)]
pub async fn rename_section(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(section_id): Path<i64>,
    Json(payload): Json<SectionTitle>,
) -> Result<Json<SuccessResponse>, AppError> {
    let success = project::rename_section(&state.pool, section_id, user.id, &payload.title).await?;
    Ok(Json(SuccessResponse { success }))
}

#[utoipa::path(
    get,
    path = "/api/label",
    responses(
        (status = 200, description = "Labels of the current user", body = Vec<Label>)
    ),
    security(
        ("bearer" = [])
    ),
    tag = "labels"
)]
pub async fn list_labels(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<Label>>, AppError> {
    Ok(Json(project::list_labels(&state.pool, user.id).await?))
}

#[utoipa::path(
    post,
    path = "/api/label",
    request_body = CreateLabel,
    responses(
        (status = 200, description = "Label created", body = Label),
        (status = 400, description = "Empty title")
    ),
    security(
        ("bearer" = [])
    ),
    tag = "labels"
)]
pub async fn create_label(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<CreateLabel>,
) -> Result<Json<Label>, AppError> {
    Ok(Json(project::create_label(&state.pool, user.id, &payload).await?))
}
