use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

// --- Domain Models (Mapped to DB) ---

#[derive(Debug, Serialize, FromRow, Clone, ToSchema)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip)]
    pub hashed_password: String,
    pub is_active: bool,
}

#[derive(Debug, Serialize, FromRow, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: i64,
    pub title: String,
    pub creator_id: i64,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Serialize, FromRow, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: i64,
    pub title: String,
    pub project_id: i64,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Serialize, FromRow, Clone, PartialEq, ToSchema)]
pub struct Priority {
    pub id: i64,
    pub title: String,
    pub color: String,
}

#[derive(Debug, Serialize, FromRow, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    pub id: i64,
    pub title: String,
    pub color: String,
    pub creator_id: i64,
}

#[derive(Debug, Serialize, FromRow, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Alarm {
    pub id: i64,
    pub task_id: i64,
    pub alarm_at: NaiveDateTime,
}

#[derive(Debug, Serialize, FromRow, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub id: i64,
    pub task_id: i64,
    pub title: Option<String>,
    pub url: String,
}

#[derive(Debug, Serialize, FromRow, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub task_id: i64,
    pub content: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// A `tasks` row.
#[derive(Debug, Serialize, FromRow, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub is_done: bool,
    pub position: i64,
    pub due_date: Option<NaiveDate>,
    pub section_id: i64,
    pub project_id: i64,
    pub parent_id: Option<i64>,
    pub priority_id: Option<i64>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// A task together with everything the client renders next to it.
#[derive(Debug, Serialize, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskDetail {
    pub id: i64,
    pub title: String,
    pub is_done: bool,
    pub position: i64,
    pub due_date: Option<NaiveDate>,
    pub section_id: i64,
    pub project_id: i64,
    pub parent_id: Option<i64>,
    pub priority: Option<Priority>,
    pub alarm: Option<Alarm>,
    pub labels: Vec<Label>,
    pub bookmarks: Vec<Bookmark>,
    pub sub_tasks: Vec<TaskDetail>,
}

impl TaskDetail {
    pub fn from_task(task: Task) -> Self {
        Self {
            id: task.id,
            title: task.title,
            is_done: task.is_done,
            position: task.position,
            due_date: task.due_date,
            section_id: task.section_id,
            project_id: task.project_id,
            parent_id: task.parent_id,
            priority: None,
            alarm: None,
            labels: Vec::new(),
            bookmarks: Vec::new(),
            sub_tasks: Vec::new(),
        }
    }
}

// --- Request/Response DTOs ---

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
}

/// The user fields the client keeps after a successful authorize call.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, ToSchema)]
pub struct AuthorizedUser {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<User> for AuthorizedUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTask {
    pub title: String,
    pub due_date: Option<NaiveDate>,
    pub parent_id: Option<i64>,
    pub priority_id: Option<i64>,
    pub label_ids: Option<Vec<i64>>,
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTask {
    pub title: Option<String>,
    pub is_done: Option<bool>,
    pub position: Option<i64>,
    pub due_date: Option<NaiveDate>,
    pub priority_id: Option<i64>,
    pub label_ids: Option<Vec<i64>>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProject {
    pub title: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SectionTitle {
    pub title: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateLabel {
    pub title: String,
    pub color: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CommentBody {
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    pub deleted: u64,
}

// JWT claims, `sub` is the user email
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}
