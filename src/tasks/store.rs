//! The task store: single source of truth for the task list, its loading and
//! error status, and the active filter.
//!
//! State is held as a [`TaskState`] snapshot inside a `tokio::sync::watch`
//! channel. Every command publishes a new snapshot, and
//! [`TaskStore::subscribe`] hands out receivers that observe each change.
//! Derived views are recomputed from the snapshot on every read.
//!
//! Network commands never return errors. A failure is recorded as a fixed,
//! per-command message in [`TaskState::error`] and the task list is left as
//! it was. Commands hold no lock across an `.await`, so several may be in
//! flight at once; responses are applied in arrival order, and for two
//! updates to the same task the last response wins.

use crate::gateway::TaskService;
use crate::tasks::filter::{count_by_status, filter_tasks, Filter, StatusCounts, FILTER_SLOT_KEY};
use crate::tasks::models::{Task, TaskDraft, TaskId, TaskPatch, TaskStatus};
use crate::traits::SlotStore;
use std::sync::Arc;
use tokio::sync::watch;

/// Message recorded when loading the task list fails.
pub const LOAD_FAILED: &str = "Failed to load tasks. Is the API server running?";
/// Message recorded when creating a task fails.
pub const CREATE_FAILED: &str = "Failed to create task.";
/// Message recorded when updating a task fails.
pub const UPDATE_FAILED: &str = "Failed to update task.";
/// Message recorded when changing a task's status fails.
pub const STATUS_FAILED: &str = "Failed to update task status.";
/// Message recorded when deleting a task fails.
pub const DELETE_FAILED: &str = "Failed to delete task.";

/// A snapshot of everything the store holds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskState {
    /// Tasks in server order.
    pub tasks: Vec<Task>,
    /// True while a load (or create) request is in flight.
    pub loading: bool,
    /// Message describing the most recent failure, if any.
    pub error: Option<String>,
    /// The active filter.
    pub filter: Filter,
}

impl TaskState {
    /// Tasks narrowed by the active filter, in server order.
    #[must_use]
    pub fn filtered_tasks(&self) -> Vec<&Task> {
        filter_tasks(&self.tasks, &self.filter)
    }

    /// Number of tasks passing the active filter.
    #[must_use]
    pub fn task_count(&self) -> usize {
        self.filtered_tasks().len()
    }

    /// Number of tasks, ignoring the filter.
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.tasks.len()
    }

    /// Unfiltered task counts per status.
    #[must_use]
    pub fn tasks_by_status(&self) -> StatusCounts {
        count_by_status(&self.tasks)
    }

    /// Find a task by id.
    #[must_use]
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }
}

/// Owns the in-memory task list and filter, and reconciles gateway results
/// into them.
pub struct TaskStore {
    service: TaskService,
    slots: Arc<dyn SlotStore>,
    state: watch::Sender<TaskState>,
}

impl std::fmt::Debug for TaskStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskStore").field("state", &*self.state.borrow()).finish_non_exhaustive()
    }
}

impl TaskStore {
    /// Create a store, restoring the persisted filter from `slots` when it
    /// holds a valid one.
    ///
    /// A missing, unreadable, or malformed persisted filter is discarded
    /// silently and the default filter is used.
    #[must_use]
    pub fn new(service: TaskService, slots: Arc<dyn SlotStore>) -> Self {
        let filter = restore_filter(slots.as_ref());
        let (state, _) = watch::channel(TaskState { filter, ..TaskState::default() });
        Self { service, slots, state }
    }

    /// Subscribe to state changes.
    ///
    /// The receiver is marked changed on every published snapshot.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<TaskState> {
        self.state.subscribe()
    }

    /// A copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> TaskState {
        self.state.borrow().clone()
    }

    /// The task list, in server order.
    #[must_use]
    pub fn tasks(&self) -> Vec<Task> {
        self.state.borrow().tasks.clone()
    }

    /// Whether a load is in flight.
    #[must_use]
    pub fn loading(&self) -> bool {
        self.state.borrow().loading
    }

    /// The most recent failure message.
    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    /// The active filter.
    #[must_use]
    pub fn filter(&self) -> Filter {
        self.state.borrow().filter.clone()
    }

    /// Tasks passing the active filter.
    #[must_use]
    pub fn filtered_tasks(&self) -> Vec<Task> {
        self.state.borrow().filtered_tasks().into_iter().cloned().collect()
    }

    /// Number of tasks passing the active filter.
    #[must_use]
    pub fn task_count(&self) -> usize {
        self.state.borrow().task_count()
    }

    /// Number of tasks, ignoring the filter.
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.state.borrow().total_count()
    }

    /// Unfiltered task counts per status.
    #[must_use]
    pub fn tasks_by_status(&self) -> StatusCounts {
        self.state.borrow().tasks_by_status()
    }

    /// Replace the task list with the server's.
    ///
    /// Clears any previous error first. On failure the previous list is kept.
    pub async fn load_tasks(&self) {
        self.state.send_modify(|s| {
            s.loading = true;
            s.error = None;
        });
        tracing::debug!("loading tasks");

        match self.service.get_all().await {
            Ok(tasks) => {
                tracing::debug!(count = tasks.len(), "tasks loaded");
                self.state.send_modify(|s| {
                    s.tasks = tasks;
                    s.loading = false;
                });
            }
            Err(e) => {
                tracing::debug!(error = %e, "loading tasks failed");
                self.fail(LOAD_FAILED, true);
            }
        }
    }

    /// Create a task and append the server's copy to the list.
    pub async fn create_task(&self, draft: TaskDraft) {
        self.state.send_modify(|s| s.loading = true);

        match self.service.create(&draft).await {
            Ok(created) => {
                tracing::debug!(task_id = created.id, "task created");
                self.state.send_modify(|s| {
                    s.tasks.push(created);
                    s.loading = false;
                });
            }
            Err(e) => {
                tracing::debug!(error = %e, "creating task failed");
                self.fail(CREATE_FAILED, true);
            }
        }
    }

    /// Apply a partial update and replace the task with the server's copy.
    pub async fn update_task(&self, id: TaskId, patch: TaskPatch) {
        self.apply_update(id, patch, UPDATE_FAILED).await;
    }

    /// Change a task's status and replace it with the server's copy.
    pub async fn update_status(&self, id: TaskId, status: TaskStatus) {
        self.apply_update(id, TaskPatch::status(status), STATUS_FAILED).await;
    }

    /// Delete a task and remove it from the list.
    pub async fn delete_task(&self, id: TaskId) {
        match self.service.delete(id).await {
            Ok(()) => {
                tracing::debug!(task_id = id, "task deleted");
                self.state.send_modify(|s| s.tasks.retain(|t| t.id != id));
            }
            Err(e) => {
                tracing::debug!(task_id = id, error = %e, "deleting task failed");
                self.fail(DELETE_FAILED, false);
            }
        }
    }

    /// Replace the active filter and persist it.
    ///
    /// Persistence failures are logged and otherwise ignored.
    pub fn set_filters(&self, filter: Filter) {
        match serde_json::to_string(&filter) {
            Ok(serialized) => {
                if let Err(e) = self.slots.write_slot(FILTER_SLOT_KEY, &serialized) {
                    tracing::warn!(error = %e, "failed to persist task filter");
                }
            }
            Err(e) => tracing::warn!(error = %e, "failed to serialize task filter"),
        }
        self.state.send_modify(|s| s.filter = filter);
    }

    async fn apply_update(&self, id: TaskId, patch: TaskPatch, failure: &str) {
        match self.service.update(id, &patch).await {
            Ok(updated) => {
                tracing::debug!(task_id = id, "task updated");
                self.state.send_modify(|s| {
                    if let Some(slot) = s.tasks.iter_mut().find(|t| t.id == id) {
                        *slot = updated;
                    }
                });
            }
            Err(e) => {
                tracing::debug!(task_id = id, error = %e, "updating task failed");
                self.fail(failure, false);
            }
        }
    }

    fn fail(&self, message: &str, end_loading: bool) {
        self.state.send_modify(|s| {
            s.error = Some(message.to_string());
            if end_loading {
                s.loading = false;
            }
        });
    }
}

fn restore_filter(slots: &dyn SlotStore) -> Filter {
    let raw = match slots.read_slot(FILTER_SLOT_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Filter::default(),
        Err(e) => {
            tracing::warn!(error = %e, "could not read persisted task filter");
            return Filter::default();
        }
    };
    serde_json::from_str(&raw).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "discarding malformed persisted task filter");
        Filter::default()
    })
}
