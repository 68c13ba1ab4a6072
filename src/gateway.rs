//! Remote task and category gateway.
//!
//! Stateless request/response mappers over an [`ApiTransport`]. The task
//! service is the only place timestamps are stamped: `createdAt` and
//! `updatedAt` on create, `updatedAt` on every update.

use crate::error::Result;
use crate::tasks::models::{Category, CategoryId, Task, TaskDraft, TaskId, TaskPatch};
use crate::traits::{ApiRequest, ApiTransport};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use std::sync::Arc;

const TASKS_PATH: &str = "/tasks";
const CATEGORIES_PATH: &str = "/categories";

/// Current wall-clock time in the format stamped onto tasks.
fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StampedDraft<'a> {
    #[serde(flatten)]
    draft: &'a TaskDraft,
    created_at: &'a str,
    updated_at: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StampedPatch<'a> {
    #[serde(flatten)]
    patch: &'a TaskPatch,
    updated_at: &'a str,
}

/// CRUD access to the `/tasks` resource.
#[derive(Clone)]
pub struct TaskService {
    transport: Arc<dyn ApiTransport>,
}

impl std::fmt::Debug for TaskService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskService").field("path", &TASKS_PATH).finish_non_exhaustive()
    }
}

impl TaskService {
    /// Create a task service over the given transport.
    #[must_use]
    pub fn new(transport: Arc<dyn ApiTransport>) -> Self {
        Self { transport }
    }

    /// Fetch every task, in server order.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is not a task list.
    pub async fn get_all(&self) -> Result<Vec<Task>> {
        let value = self.transport.send(ApiRequest::get(TASKS_PATH)).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Fetch a single task.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is not a task.
    pub async fn get_by_id(&self, id: TaskId) -> Result<Task> {
        let value = self.transport.send(ApiRequest::get(format!("{TASKS_PATH}/{id}"))).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Create a task, stamping `createdAt` and `updatedAt` with the same instant.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is not a task.
    pub async fn create(&self, draft: &TaskDraft) -> Result<Task> {
        let now = now_timestamp();
        let body =
            serde_json::to_value(StampedDraft { draft, created_at: &now, updated_at: &now })?;
        let value = self.transport.send(ApiRequest::post(TASKS_PATH, body)).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Apply a partial update, stamping a fresh `updatedAt`.
    ///
    /// The returned task is the server's authoritative version.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is not a task.
    pub async fn update(&self, id: TaskId, patch: &TaskPatch) -> Result<Task> {
        let now = now_timestamp();
        let body = serde_json::to_value(StampedPatch { patch, updated_at: &now })?;
        let value =
            self.transport.send(ApiRequest::patch(format!("{TASKS_PATH}/{id}"), body)).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Delete a task.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn delete(&self, id: TaskId) -> Result<()> {
        self.transport.send(ApiRequest::delete(format!("{TASKS_PATH}/{id}"))).await?;
        Ok(())
    }
}

/// Read-only access to the `/categories` resource.
#[derive(Clone)]
pub struct CategoryService {
    transport: Arc<dyn ApiTransport>,
}

impl std::fmt::Debug for CategoryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CategoryService").field("path", &CATEGORIES_PATH).finish_non_exhaustive()
    }
}

impl CategoryService {
    /// Create a category service over the given transport.
    #[must_use]
    pub fn new(transport: Arc<dyn ApiTransport>) -> Self {
        Self { transport }
    }

    /// Fetch every category.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is not a category list.
    pub async fn get_all(&self) -> Result<Vec<Category>> {
        let value = self.transport.send(ApiRequest::get(CATEGORIES_PATH)).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Fetch a single category.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is not a category.
    pub async fn get_by_id(&self, id: CategoryId) -> Result<Category> {
        let value =
            self.transport.send(ApiRequest::get(format!("{CATEGORIES_PATH}/{id}"))).await?;
        Ok(serde_json::from_value(value)?)
    }
}

/// Look up a task for a detail or edit view.
///
/// Any failure means the caller should show its not-found outcome.
pub async fn resolve_task(service: &TaskService, id: TaskId) -> Option<Task> {
    match service.get_by_id(id).await {
        Ok(task) => Some(task),
        Err(e) => {
            tracing::warn!(task_id = id, error = %e, "task lookup failed, treating as not found");
            None
        }
    }
}
