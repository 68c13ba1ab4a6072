//! Terminal rendering of tasks, categories, and store state using Tera.
//!
//! Templates are embedded at compile time and parsed once on first use.

use crate::error::{Error, Result};
use crate::tasks::{Category, CategoryId, Filter, StatusCounts, Task, TaskId, TaskState};
use once_cell::sync::Lazy;
use serde::Serialize;
use tera::{Context, Tera};

const TASK_CARD: &str = "task_card.tera";
const TASK_LIST: &str = "task_list.tera";
const TASK_DETAIL: &str = "task_detail.tera";
const CATEGORIES: &str = "categories.tera";
const SUMMARY: &str = "summary.tera";
const FILTER: &str = "filter.tera";
const NOT_FOUND: &str = "not_found.tera";

const EMBEDDED_TEMPLATES: &[(&str, &str)] = &[
    (TASK_CARD, include_str!("../templates/task_card.tera")),
    (TASK_LIST, include_str!("../templates/task_list.tera")),
    (TASK_DETAIL, include_str!("../templates/task_detail.tera")),
    (CATEGORIES, include_str!("../templates/categories.tera")),
    (SUMMARY, include_str!("../templates/summary.tera")),
    (FILTER, include_str!("../templates/filter.tera")),
    (NOT_FOUND, include_str!("../templates/not_found.tera")),
];

static TERA: Lazy<std::result::Result<Tera, String>> = Lazy::new(|| {
    let mut tera = Tera::default();
    tera.add_raw_templates(EMBEDDED_TEMPLATES.iter().copied())
        .map_err(|e| format!("Failed to load embedded templates: {e}"))?;
    Ok(tera)
});

/// A task flattened for display, with its card class names precomputed.
#[derive(Debug, Clone, Serialize)]
pub struct TaskView {
    /// Task id.
    pub id: TaskId,
    /// Title.
    pub title: String,
    /// Description, possibly empty.
    pub description: String,
    /// Status wire name, e.g. `IN_PROGRESS`.
    pub status: &'static str,
    /// Priority wire name, e.g. `HIGH`.
    pub priority: &'static str,
    /// Class name for the status, e.g. `status-in-progress`.
    pub status_class: String,
    /// Class name for the priority, e.g. `priority-high`.
    pub priority_class: String,
    /// The status the card's toggle would move to.
    pub next_status: &'static str,
    /// Category id.
    pub category_id: CategoryId,
    /// Due date as `YYYY-MM-DD`.
    pub due_date: String,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
}

impl From<&Task> for TaskView {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id,
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status.as_str(),
            priority: task.priority.as_str(),
            status_class: task.status.css_class(),
            priority_class: task.priority.css_class(),
            next_status: task.status.next().as_str(),
            category_id: task.category_id,
            due_date: task.due_date.format("%Y-%m-%d").to_string(),
            created_at: task.created_at.to_rfc3339(),
            updated_at: task.updated_at.to_rfc3339(),
        }
    }
}

/// Render an embedded template by name.
///
/// # Errors
///
/// Returns an error if the template doesn't exist or rendering fails.
pub fn render(name: &str, context: &Context) -> Result<String> {
    let tera = Lazy::force(&TERA).as_ref().map_err(|e| Error::Template(e.clone()))?;
    tera.render(name, context)
        .map_err(|e| Error::Template(format!("Failed to render template {name}: {e}")))
}

/// Render one task card.
///
/// # Errors
///
/// Returns an error if rendering fails.
pub fn render_task_card(task: &Task) -> Result<String> {
    let mut ctx = Context::new();
    ctx.insert("task", &TaskView::from(task));
    Ok(render(TASK_CARD, &ctx)?.trim_end().to_string())
}

/// Render the filtered task list with counts, the active filter, and any
/// recorded error.
///
/// # Errors
///
/// Returns an error if rendering fails.
pub fn render_task_list(state: &TaskState) -> Result<String> {
    let cards = state
        .filtered_tasks()
        .into_iter()
        .map(render_task_card)
        .collect::<Result<Vec<_>>>()?;

    let mut ctx = Context::new();
    ctx.insert("cards", &cards);
    ctx.insert("task_count", &cards.len());
    ctx.insert("total_count", &state.total_count());
    ctx.insert("filter_active", &!state.filter.is_unconstrained());
    ctx.insert("filter_summary", &filter_summary(&state.filter));
    ctx.insert("error", &state.error);
    render(TASK_LIST, &ctx)
}

/// Render a single task with its category.
///
/// # Errors
///
/// Returns an error if rendering fails.
pub fn render_task_detail(task: &Task, category: Option<&Category>) -> Result<String> {
    let mut ctx = Context::new();
    ctx.insert("card", &render_task_card(task)?);
    ctx.insert("task", &TaskView::from(task));
    ctx.insert("category", &category);
    render(TASK_DETAIL, &ctx)
}

/// Render the category list.
///
/// # Errors
///
/// Returns an error if rendering fails.
pub fn render_categories(categories: &[Category]) -> Result<String> {
    let mut ctx = Context::new();
    ctx.insert("categories", categories);
    render(CATEGORIES, &ctx)
}

/// Render per-status counts.
///
/// # Errors
///
/// Returns an error if rendering fails.
pub fn render_summary(counts: &StatusCounts) -> Result<String> {
    let mut ctx = Context::new();
    ctx.insert("counts", counts);
    ctx.insert("total", &counts.total());
    render(SUMMARY, &ctx)
}

/// Render the active filter.
///
/// # Errors
///
/// Returns an error if rendering fails.
pub fn render_filter(filter: &Filter) -> Result<String> {
    let mut ctx = Context::new();
    ctx.insert("filter", filter);
    render(FILTER, &ctx)
}

/// Render the not-found outcome for a task lookup.
///
/// # Errors
///
/// Returns an error if rendering fails.
pub fn render_not_found(id: TaskId) -> Result<String> {
    let mut ctx = Context::new();
    ctx.insert("id", &id);
    render(NOT_FOUND, &ctx)
}

/// Names of all embedded templates.
#[must_use]
pub fn template_names() -> Vec<&'static str> {
    EMBEDDED_TEMPLATES.iter().map(|(name, _)| *name).collect()
}

fn filter_summary(filter: &Filter) -> String {
    let mut parts = Vec::new();
    if let Some(status) = filter.status {
        parts.push(format!("status={status}"));
    }
    if let Some(priority) = filter.priority {
        parts.push(format!("priority={priority}"));
    }
    if !filter.search.is_empty() {
        parts.push(format!("search=\"{}\"", filter.search));
    }
    parts.join(" ")
}
