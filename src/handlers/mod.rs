pub mod auth;
pub mod comments;
pub mod projects;
pub mod tasks;
