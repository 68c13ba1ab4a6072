//! Create/edit form model for a single task.
//!
//! Holds the raw field values a user typed, validates them with the rules in
//! [`crate::validators`], and converts a valid form into the draft or patch
//! the gateway expects.

use crate::tasks::models::{CategoryId, Task, TaskDraft, TaskPatch, TaskPriority, TaskStatus};
use crate::validators::{
    future_date_on, min_length_trimmed, parse_calendar_date, required, ValidationError,
};
use chrono::{Local, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

/// Minimum trimmed title length.
pub const TITLE_MIN_LENGTH: usize = 3;

/// Category a new task is filed under unless the user picks another.
pub const DEFAULT_CATEGORY_ID: CategoryId = 1;

/// A validated form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    /// The task title.
    Title,
    /// The due date.
    DueDate,
}

impl FormField {
    /// The field name as shown to users.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::DueDate => "dueDate",
        }
    }
}

/// Failed rules per field. A field with no entry is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<FormField, Vec<ValidationError>>);

impl FormErrors {
    /// True when every field passed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Errors recorded for `field`.
    #[must_use]
    pub fn field(&self, field: FormField) -> &[ValidationError] {
        self.0.get(&field).map(Vec::as_slice).unwrap_or_default()
    }

    /// Iterate over fields with errors, in field order.
    pub fn iter(&self) -> impl Iterator<Item = (FormField, &[ValidationError])> {
        self.0.iter().map(|(field, errors)| (*field, errors.as_slice()))
    }

    fn push(&mut self, field: FormField, error: ValidationError) {
        self.0.entry(field).or_default().push(error);
    }
}

impl std::fmt::Display for FormErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, errors) in self.iter() {
            for error in errors {
                if !first {
                    writeln!(f)?;
                }
                write!(f, "{} {error}", field.as_str())?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Raw field values for creating or editing a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskForm {
    /// Title as typed.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Chosen priority.
    pub priority: TaskPriority,
    /// Chosen status.
    pub status: TaskStatus,
    /// Chosen category.
    pub category_id: CategoryId,
    /// Due date as typed, expected as `YYYY-MM-DD`.
    pub due_date: String,
}

impl Default for TaskForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            priority: TaskPriority::Medium,
            status: TaskStatus::Todo,
            category_id: DEFAULT_CATEGORY_ID,
            due_date: String::new(),
        }
    }
}

impl TaskForm {
    /// Fill the form from an existing task, for edit mode.
    #[must_use]
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            priority: task.priority,
            status: task.status,
            category_id: task.category_id,
            due_date: task.due_date.format("%Y-%m-%d").to_string(),
        }
    }

    /// Validate against the current local date.
    #[must_use]
    pub fn validate(&self) -> FormErrors {
        self.validate_on(Local::now().date_naive())
    }

    /// Validate against an explicit `today`.
    #[must_use]
    pub fn validate_on(&self, today: NaiveDate) -> FormErrors {
        let mut errors = FormErrors::default();

        let title_rules = [required(&self.title), min_length_trimmed(TITLE_MIN_LENGTH)(&self.title)];
        for error in title_rules.into_iter().filter_map(Result::err) {
            errors.push(FormField::Title, error);
        }

        let due_rules = [required(&self.due_date), future_date_on(&self.due_date, today)];
        for error in due_rules.into_iter().filter_map(Result::err) {
            errors.push(FormField::DueDate, error);
        }

        errors
    }

    /// Convert to a create request.
    ///
    /// # Errors
    ///
    /// Returns the validation errors if the form is invalid.
    pub fn to_draft(&self) -> Result<TaskDraft, FormErrors> {
        self.to_draft_on(Local::now().date_naive())
    }

    /// [`TaskForm::to_draft`] against an explicit `today`.
    ///
    /// # Errors
    ///
    /// Returns the validation errors if the form is invalid.
    pub fn to_draft_on(&self, today: NaiveDate) -> Result<TaskDraft, FormErrors> {
        let due_date = self.checked_due_date(today)?;
        Ok(TaskDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            status: self.status,
            priority: self.priority,
            category_id: self.category_id,
            due_date,
        })
    }

    /// Convert to an edit submission carrying every field.
    ///
    /// # Errors
    ///
    /// Returns the validation errors if the form is invalid.
    pub fn to_patch(&self) -> Result<TaskPatch, FormErrors> {
        self.to_patch_on(Local::now().date_naive())
    }

    /// [`TaskForm::to_patch`] against an explicit `today`.
    ///
    /// # Errors
    ///
    /// Returns the validation errors if the form is invalid.
    pub fn to_patch_on(&self, today: NaiveDate) -> Result<TaskPatch, FormErrors> {
        let draft = self.to_draft_on(today)?;
        Ok(TaskPatch {
            title: Some(draft.title),
            description: Some(draft.description),
            status: Some(draft.status),
            priority: Some(draft.priority),
            category_id: Some(draft.category_id),
            due_date: Some(draft.due_date),
        })
    }

    /// Whether the form differs from the task it was loaded from.
    #[must_use]
    pub fn is_dirty(&self, original: &Task) -> bool {
        *self != Self::from_task(original)
    }

    fn checked_due_date(&self, today: NaiveDate) -> Result<NaiveDate, FormErrors> {
        let errors = self.validate_on(today);
        if !errors.is_empty() {
            return Err(errors);
        }
        // validate_on already rejected unparseable dates
        parse_calendar_date(&self.due_date).ok_or_else(|| {
            let mut errors = FormErrors::default();
            errors.push(
                FormField::DueDate,
                ValidationError::FutureDate { actual_date: self.due_date.clone() },
            );
            errors
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sample_task_json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn valid_form() -> TaskForm {
        TaskForm {
            title: "Write report".to_string(),
            due_date: "2026-11-01".to_string(),
            ..TaskForm::default()
        }
    }

    fn sample_task() -> Task {
        serde_json::from_value(sample_task_json(4, "Existing", "IN_PROGRESS")).unwrap()
    }

    #[test]
    fn test_defaults() {
        let form = TaskForm::default();
        assert_eq!(form.priority, TaskPriority::Medium);
        assert_eq!(form.status, TaskStatus::Todo);
        assert_eq!(form.category_id, 1);
        assert!(form.title.is_empty());
    }

    #[test]
    fn test_empty_form_requires_title_and_due_date() {
        let errors = TaskForm::default().validate_on(today());
        assert_eq!(errors.field(FormField::Title), &[ValidationError::Required]);
        assert_eq!(errors.field(FormField::DueDate), &[ValidationError::Required]);
    }

    #[test]
    fn test_short_title_rejected() {
        let form = TaskForm { title: " ab ".to_string(), ..valid_form() };
        let errors = form.validate_on(today());
        assert_eq!(
            errors.field(FormField::Title),
            &[ValidationError::MinLengthTrimmed { required_length: 3, actual_length: 2 }]
        );
        assert!(errors.field(FormField::DueDate).is_empty());
    }

    #[test]
    fn test_past_due_date_rejected() {
        let form = TaskForm { due_date: "2026-10-18".to_string(), ..valid_form() };
        let errors = form.validate_on(today());
        assert_eq!(errors.field(FormField::DueDate)[0].rule(), "futureDate");
    }

    #[test]
    fn test_valid_form_converts_to_draft() {
        let draft = valid_form().to_draft_on(today()).unwrap();
        assert_eq!(draft.title, "Write report");
        assert_eq!(draft.due_date, NaiveDate::from_ymd_opt(2026, 11, 1).unwrap());
        assert_eq!(draft.category_id, DEFAULT_CATEGORY_ID);
    }

    #[test]
    fn test_invalid_form_does_not_convert() {
        let form = TaskForm { title: String::new(), ..valid_form() };
        let errors = form.to_draft_on(today()).unwrap_err();
        assert!(!errors.field(FormField::Title).is_empty());
        assert!(form.to_patch_on(today()).is_err());
    }

    #[test]
    fn test_patch_carries_every_field() {
        let patch = valid_form().to_patch_on(today()).unwrap();
        assert_eq!(patch.title.as_deref(), Some("Write report"));
        assert_eq!(patch.description.as_deref(), Some(""));
        assert_eq!(patch.status, Some(TaskStatus::Todo));
        assert_eq!(patch.priority, Some(TaskPriority::Medium));
        assert_eq!(patch.category_id, Some(1));
        assert!(patch.due_date.is_some());
    }

    #[test]
    fn test_from_task_and_dirty_tracking() {
        let task = sample_task();
        let mut form = TaskForm::from_task(&task);
        assert_eq!(form.title, "Existing");
        assert_eq!(form.status, TaskStatus::InProgress);
        assert_eq!(form.due_date, "2026-03-01");
        assert!(!form.is_dirty(&task));

        form.title = "Renamed".to_string();
        assert!(form.is_dirty(&task));
    }

    #[test]
    fn test_errors_display_and_serialize() {
        let errors = TaskForm::default().validate_on(today());
        assert_eq!(errors.to_string(), "title is required\ndueDate is required");
        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            serde_json::json!({ "title": ["required"], "dueDate": ["required"] })
        );
    }
}
