//! Command execution for the CLI.
//!
//! This module handles running CLI commands and producing output.

use crate::cli::{Cli, Command};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::form::TaskForm;
use crate::gateway::{resolve_task, CategoryService, TaskService};
use crate::paths;
use crate::storage::SqliteSlotStore;
use crate::tasks::{CategoryId, Filter, Task, TaskId, TaskPriority, TaskStatus, TaskStore};
use crate::templates;
use crate::traits::{ApiTransport, SlotStore};
use crate::transport::HttpTransport;
use std::process::ExitCode;
use std::str::FromStr;
use std::sync::Arc;

/// Output from running the CLI, with separate stdout and stderr messages.
#[derive(Debug)]
pub struct CliOutput {
    /// Exit code for the process.
    pub exit_code: ExitCode,
    /// Messages to print to stdout.
    pub stdout: Vec<String>,
    /// Messages to print to stderr.
    pub stderr: Vec<String>,
}

impl CliOutput {
    fn success(message: String) -> Self {
        Self { exit_code: ExitCode::SUCCESS, stdout: vec![message], stderr: vec![] }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self { exit_code: ExitCode::from(1), stdout: vec![], stderr: vec![message.into()] }
    }
}

impl From<Result<Self>> for CliOutput {
    fn from(result: Result<Self>) -> Self {
        result.unwrap_or_else(|e| Self::failure(format!("Error: {e}")))
    }
}

/// The collaborators a command runs against.
#[derive(Clone)]
pub struct CliContext {
    transport: Arc<dyn ApiTransport>,
    slots: Arc<dyn SlotStore>,
}

impl std::fmt::Debug for CliContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CliContext").finish_non_exhaustive()
    }
}

impl CliContext {
    /// Create a context from explicit collaborators.
    #[must_use]
    pub fn new(transport: Arc<dyn ApiTransport>, slots: Arc<dyn SlotStore>) -> Self {
        Self { transport, slots }
    }

    /// Build the real context for parsed arguments: config and preferences
    /// from the data directory, HTTP transport to the configured API.
    ///
    /// # Errors
    ///
    /// Returns an error if no data directory can be determined, the config
    /// file is invalid, or the preferences database cannot be opened.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let data_dir = cli
            .data_dir
            .clone()
            .or_else(paths::data_dir)
            .ok_or_else(|| Error::NotFound("home directory".to_string()))?;

        let config = ClientConfig::load_or_default(&paths::config_path(&data_dir))?
            .with_api_base_url(cli.api_url.clone());
        tracing::debug!(api = %config.api_base_url, data_dir = %data_dir.display(), "client configured");

        let transport = Arc::new(HttpTransport::new(&config)?);
        let slots = Arc::new(SqliteSlotStore::in_data_dir(&data_dir)?);
        Ok(Self::new(transport, slots))
    }

    fn store(&self) -> TaskStore {
        TaskStore::new(self.task_service(), Arc::clone(&self.slots))
    }

    fn task_service(&self) -> TaskService {
        TaskService::new(Arc::clone(&self.transport))
    }

    fn category_service(&self) -> CategoryService {
        CategoryService::new(Arc::clone(&self.transport))
    }
}

/// Run a CLI command.
pub async fn run(command: Command, ctx: &CliContext) -> CliOutput {
    let result = match command {
        Command::List { status, priority, search, clear } => {
            run_list(ctx, status.as_deref(), priority.as_deref(), search, clear).await
        }
        Command::Show { id } => run_show(ctx, id).await,
        Command::Create { title, description, priority, status, category, due } => {
            let form = TaskForm {
                title,
                description,
                priority,
                status,
                category_id: category,
                due_date: due,
            };
            run_create(ctx, &form).await
        }
        Command::Edit { id, title, description, priority, status, category, due } => {
            let edits = FormEdits { title, description, priority, status, category, due };
            run_edit(ctx, id, edits).await
        }
        Command::Status { id, status } => run_status(ctx, id, Some(status)).await,
        Command::Advance { id } => run_status(ctx, id, None).await,
        Command::Delete { id } => run_delete(ctx, id).await,
        Command::Categories => run_categories(ctx).await,
        Command::Summary => run_summary(ctx).await,
        Command::Filter => run_filter(ctx),
    };
    result.into()
}

/// Parse a filter flag, where `any` or an empty value drops the constraint.
fn parse_filter_value<T: FromStr>(value: &str) -> std::result::Result<Option<T>, T::Err> {
    if value.is_empty() || value.eq_ignore_ascii_case("any") {
        return Ok(None);
    }
    value.parse().map(Some)
}

async fn run_list(
    ctx: &CliContext,
    status: Option<&str>,
    priority: Option<&str>,
    search: Option<String>,
    clear: bool,
) -> Result<CliOutput> {
    let store = ctx.store();

    let mut filter = if clear { Filter::default() } else { store.filter() };
    if let Some(status) = status {
        filter.status = parse_filter_value::<TaskStatus>(status)
            .map_err(|e| Error::InvalidInput(e.to_string()))?;
    }
    if let Some(priority) = priority {
        filter.priority = parse_filter_value::<TaskPriority>(priority)
            .map_err(|e| Error::InvalidInput(e.to_string()))?;
    }
    if let Some(search) = search {
        filter.search = search;
    }
    if filter != store.filter() {
        store.set_filters(filter);
    }

    store.load_tasks().await;
    let state = store.snapshot();
    let rendered = templates::render_task_list(&state)?;
    if state.error.is_some() {
        return Ok(CliOutput { exit_code: ExitCode::from(1), stdout: vec![rendered], stderr: vec![] });
    }
    Ok(CliOutput::success(rendered))
}

async fn run_show(ctx: &CliContext, id: TaskId) -> Result<CliOutput> {
    let Some(task) = resolve_task(&ctx.task_service(), id).await else {
        return Ok(CliOutput::failure(templates::render_not_found(id)?));
    };

    let category = match ctx.category_service().get_by_id(task.category_id).await {
        Ok(category) => Some(category),
        Err(e) => {
            tracing::debug!(category_id = task.category_id, error = %e, "category lookup failed");
            None
        }
    };
    Ok(CliOutput::success(templates::render_task_detail(&task, category.as_ref())?))
}

async fn run_create(ctx: &CliContext, form: &TaskForm) -> Result<CliOutput> {
    let draft = match form.to_draft() {
        Ok(draft) => draft,
        Err(errors) => return Ok(CliOutput::failure(format!("Invalid task:\n{errors}"))),
    };

    let store = ctx.store();
    store.create_task(draft).await;
    if let Some(error) = store.error() {
        return Ok(CliOutput::failure(error));
    }

    let state = store.snapshot();
    let created = state.tasks.last().ok_or_else(|| Error::NotFound("created task".to_string()))?;
    Ok(CliOutput::success(templates::render_task_card(created)?))
}

/// Field values given on the `edit` command line.
struct FormEdits {
    title: Option<String>,
    description: Option<String>,
    priority: Option<TaskPriority>,
    status: Option<TaskStatus>,
    category: Option<CategoryId>,
    due: Option<String>,
}

impl FormEdits {
    fn apply(self, form: &mut TaskForm) {
        if let Some(title) = self.title {
            form.title = title;
        }
        if let Some(description) = self.description {
            form.description = description;
        }
        if let Some(priority) = self.priority {
            form.priority = priority;
        }
        if let Some(status) = self.status {
            form.status = status;
        }
        if let Some(category) = self.category {
            form.category_id = category;
        }
        if let Some(due) = self.due {
            form.due_date = due;
        }
    }
}

async fn run_edit(ctx: &CliContext, id: TaskId, edits: FormEdits) -> Result<CliOutput> {
    let store = ctx.store();
    let original = match loaded_task(&store, id).await? {
        Ok(task) => task,
        Err(output) => return Ok(output),
    };

    let mut form = TaskForm::from_task(&original);
    edits.apply(&mut form);
    if !form.is_dirty(&original) {
        return Ok(CliOutput::success(format!("No changes to task #{id}.")));
    }

    let patch = match form.to_patch() {
        Ok(patch) => patch,
        Err(errors) => return Ok(CliOutput::failure(format!("Invalid task:\n{errors}"))),
    };

    store.update_task(id, patch).await;
    render_updated(&store, id)
}

/// Set a task's status, or advance it one step when `status` is `None`.
async fn run_status(ctx: &CliContext, id: TaskId, status: Option<TaskStatus>) -> Result<CliOutput> {
    let store = ctx.store();
    let task = match loaded_task(&store, id).await? {
        Ok(task) => task,
        Err(output) => return Ok(output),
    };

    let status = status.unwrap_or_else(|| task.status.next());
    store.update_status(id, status).await;
    render_updated(&store, id)
}

async fn run_delete(ctx: &CliContext, id: TaskId) -> Result<CliOutput> {
    let store = ctx.store();
    if let Err(output) = loaded_task(&store, id).await? {
        return Ok(output);
    }

    store.delete_task(id).await;
    if let Some(error) = store.error() {
        return Ok(CliOutput::failure(error));
    }
    Ok(CliOutput::success(format!("Deleted task #{id}.")))
}

async fn run_categories(ctx: &CliContext) -> Result<CliOutput> {
    let categories = ctx.category_service().get_all().await?;
    Ok(CliOutput::success(templates::render_categories(&categories)?))
}

async fn run_summary(ctx: &CliContext) -> Result<CliOutput> {
    let store = ctx.store();
    store.load_tasks().await;
    if let Some(error) = store.error() {
        return Ok(CliOutput::failure(error));
    }
    Ok(CliOutput::success(templates::render_summary(&store.tasks_by_status())?))
}

fn run_filter(ctx: &CliContext) -> Result<CliOutput> {
    Ok(CliOutput::success(templates::render_filter(&ctx.store().filter())?))
}

/// Load the list and look up one task in it, or the output to show instead
/// when the list cannot be loaded or the task is missing.
async fn loaded_task(
    store: &TaskStore,
    id: TaskId,
) -> Result<std::result::Result<Task, CliOutput>> {
    store.load_tasks().await;
    if let Some(error) = store.error() {
        return Ok(Err(CliOutput::failure(error)));
    }
    match store.snapshot().task(id) {
        Some(task) => Ok(Ok(task.clone())),
        None => Ok(Err(CliOutput::failure(templates::render_not_found(id)?))),
    }
}

fn render_updated(store: &TaskStore, id: TaskId) -> Result<CliOutput> {
    if let Some(error) = store.error() {
        return Ok(CliOutput::failure(error));
    }
    let state = store.snapshot();
    let task = state.task(id).ok_or_else(|| Error::NotFound(format!("task #{id}")))?;
    Ok(CliOutput::success(templates::render_task_card(task)?))
}
