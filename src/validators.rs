//! Validation rules for task form fields.
//!
//! Each rule judges a single field value in isolation. The length and date
//! rules accept empty input: requiredness is the [`required`] rule's job, and
//! callers compose rules per field.

use chrono::{DateTime, Local, NaiveDate};
use serde::Serialize;

/// A failed validation rule, serialized as `{"<rule>": {<details>}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ValidationError {
    /// The value is missing or empty.
    Required,
    /// The trimmed value is shorter than required.
    MinLengthTrimmed {
        /// Minimum accepted length.
        required_length: usize,
        /// Length after trimming.
        actual_length: usize,
    },
    /// The date lies before today.
    FutureDate {
        /// The raw value that was rejected.
        actual_date: String,
    },
}

impl ValidationError {
    /// The rule name, e.g. `minLengthTrimmed`.
    #[must_use]
    pub const fn rule(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::MinLengthTrimmed { .. } => "minLengthTrimmed",
            Self::FutureDate { .. } => "futureDate",
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Required => write!(f, "is required"),
            Self::MinLengthTrimmed { required_length, actual_length } => write!(
                f,
                "must be at least {required_length} characters (got {actual_length})"
            ),
            Self::FutureDate { actual_date } => {
                write!(f, "must not be in the past (got {actual_date})")
            }
        }
    }
}

/// Outcome of a single rule.
pub type RuleResult = Result<(), ValidationError>;

/// Fail when the value is empty.
///
/// # Errors
///
/// Returns [`ValidationError::Required`] for an empty value.
pub fn required(value: &str) -> RuleResult {
    if value.is_empty() {
        Err(ValidationError::Required)
    } else {
        Ok(())
    }
}

/// Build a rule requiring at least `min_length` characters once leading and
/// trailing whitespace is removed. Empty input passes.
pub fn min_length_trimmed(min_length: usize) -> impl Fn(&str) -> RuleResult {
    move |value| {
        if value.is_empty() {
            return Ok(());
        }
        let actual_length = value.trim().chars().count();
        if actual_length < min_length {
            return Err(ValidationError::MinLengthTrimmed {
                required_length: min_length,
                actual_length,
            });
        }
        Ok(())
    }
}

/// Fail when the date lies before the current local calendar day. Today passes,
/// as does empty input.
///
/// # Errors
///
/// Returns [`ValidationError::FutureDate`] for a past or unparseable date.
pub fn future_date(value: &str) -> RuleResult {
    future_date_on(value, Local::now().date_naive())
}

/// [`future_date`] against an explicit `today`.
///
/// # Errors
///
/// Returns [`ValidationError::FutureDate`] for a date before `today` or an
/// unparseable value.
pub fn future_date_on(value: &str, today: NaiveDate) -> RuleResult {
    if value.is_empty() {
        return Ok(());
    }
    match parse_calendar_date(value) {
        Some(date) if date >= today => Ok(()),
        _ => Err(ValidationError::FutureDate { actual_date: value.to_string() }),
    }
}

/// Parse `YYYY-MM-DD`, or an RFC 3339 timestamp reduced to its calendar day.
#[must_use]
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
}
