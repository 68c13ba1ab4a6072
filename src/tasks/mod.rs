//! Task data model, filtering, and the client-side task store.
//!
//! - [`models`]: tasks, drafts, patches, categories, and their enums
//! - [`filter`]: the active filter and the views derived from a task list
//! - [`store`]: the observable [`TaskStore`] that reconciles gateway results
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use taskboard::config::ClientConfig;
//! use taskboard::gateway::TaskService;
//! use taskboard::storage::SqliteSlotStore;
//! use taskboard::tasks::{Filter, TaskStatus, TaskStore};
//! use taskboard::transport::HttpTransport;
//!
//! # async fn example() -> taskboard::Result<()> {
//! let transport = Arc::new(HttpTransport::new(&ClientConfig::default())?);
//! let slots = Arc::new(SqliteSlotStore::with_path("/tmp/prefs.sqlite3".into())?);
//! let store = TaskStore::new(TaskService::new(transport), slots);
//!
//! store.load_tasks().await;
//! store.set_filters(Filter { status: Some(TaskStatus::Todo), ..Filter::default() });
//! for task in store.filtered_tasks() {
//!     println!("{} {}", task.id, task.title);
//! }
//! # Ok(())
//! # }
//! ```

pub mod filter;
pub mod models;
pub mod store;

pub use filter::{count_by_status, filter_tasks, Filter, StatusCounts, FILTER_SLOT_KEY};
pub use models::{
    Category, CategoryId, InvalidPriority, InvalidStatus, Task, TaskDraft, TaskId, TaskPatch,
    TaskPriority, TaskStatus,
};
pub use store::{TaskState, TaskStore};
