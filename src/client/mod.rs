//! Client-side logic: the signed-in user store and the task row view model.

pub mod api;
pub mod task_cell;
pub mod user_store;

pub use api::{AuthApi, ClientError, HttpApi};
pub use task_cell::{CellContent, CheckableTask, TaskCell};
pub use user_store::{Alerter, MemoryTokenStore, Navigator, TokenStore, UserStore};
