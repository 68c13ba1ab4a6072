//! Task filters and the views derived from a task list.
//!
//! Everything here is a pure function of its inputs: the store recomputes
//! the views from its current snapshot on every read.

use crate::tasks::models::{Task, TaskPriority, TaskStatus};
use serde::{Deserialize, Serialize};

/// Durable slot key under which the active filter is persisted.
pub const FILTER_SLOT_KEY: &str = "taskFilters";

/// A predicate narrowing the visible task set.
///
/// `None` for status or priority, and an empty search string, mean "any".
/// On the wire "any" is the empty string, e.g.
/// `{"status":"","priority":"HIGH","search":""}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    /// Exact status match.
    #[serde(default, with = "blank_as_none")]
    pub status: Option<TaskStatus>,
    /// Exact priority match.
    #[serde(default, with = "blank_as_none")]
    pub priority: Option<TaskPriority>,
    /// Case-insensitive substring over title and description.
    #[serde(default)]
    pub search: String,
}

impl Filter {
    /// Check whether the filter places no constraint at all.
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.status.is_none() && self.priority.is_none() && self.search.is_empty()
    }

    /// Check whether a single task passes every active predicate.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        if let Some(status) = self.status {
            if task.status != status {
                return false;
            }
        }
        if let Some(priority) = self.priority {
            if task.priority != priority {
                return false;
            }
        }
        if !self.search.is_empty() {
            let term = self.search.to_lowercase();
            return task.title.to_lowercase().contains(&term)
                || task.description.to_lowercase().contains(&term);
        }
        true
    }
}

/// Task counts per status bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    /// Tasks with status TODO.
    pub todo: usize,
    /// Tasks with status `IN_PROGRESS`.
    pub in_progress: usize,
    /// Tasks with status DONE.
    pub done: usize,
}

impl StatusCounts {
    /// Sum across all buckets.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.todo + self.in_progress + self.done
    }
}

/// Narrow `tasks` by `filter`, preserving order.
#[must_use]
pub fn filter_tasks<'a>(tasks: &'a [Task], filter: &Filter) -> Vec<&'a Task> {
    tasks.iter().filter(|task| filter.matches(task)).collect()
}

/// Partition `tasks` into status buckets.
#[must_use]
pub fn count_by_status(tasks: &[Task]) -> StatusCounts {
    tasks.iter().fold(StatusCounts::default(), |mut counts, task| {
        match task.status {
            TaskStatus::Todo => counts.todo += 1,
            TaskStatus::InProgress => counts.in_progress += 1,
            TaskStatus::Done => counts.done += 1,
        }
        counts
    })
}

/// Serde adapter mapping `None` to and from the empty string.
///
/// Non-empty values must be exact wire names; the lenient spellings the CLI
/// accepts are not valid here.
mod blank_as_none {
    use serde::de::value::StringDeserializer;
    use serde::de::IntoDeserializer;
    use serde::{Deserialize, Deserializer, Serializer};
    use std::fmt::Display;

    pub fn serialize<S, T>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Display,
    {
        match value {
            Some(v) => serializer.collect_str(v),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(raw) if raw.is_empty() => Ok(None),
            Some(raw) => {
                let raw: StringDeserializer<D::Error> = raw.into_deserializer();
                T::deserialize(raw).map(Some)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use proptest::prelude::*;

    fn task(id: u64, title: &str, description: &str, status: TaskStatus, priority: TaskPriority) -> Task {
        let stamp = Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap();
        Task {
            id,
            title: title.to_string(),
            description: description.to_string(),
            status,
            priority,
            category_id: 1,
            due_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            created_at: stamp,
            updated_at: stamp,
        }
    }

    fn sample() -> Vec<Task> {
        vec![
            task(1, "Task 1", "Desc 1", TaskStatus::Todo, TaskPriority::High),
            task(2, "Task 2", "Desc 2", TaskStatus::Done, TaskPriority::Low),
            task(3, "Write report", "quarterly NUMBERS", TaskStatus::InProgress, TaskPriority::High),
        ]
    }

    #[test]
    fn test_default_filter_matches_everything() {
        let tasks = sample();
        let filter = Filter::default();
        assert!(filter.is_unconstrained());
        assert_eq!(filter_tasks(&tasks, &filter).len(), 3);
    }

    #[test]
    fn test_filter_by_status() {
        let tasks = sample();
        let filter = Filter { status: Some(TaskStatus::Todo), ..Filter::default() };
        let result = filter_tasks(&tasks, &filter);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].title, "Task 1");
    }

    #[test]
    fn test_filter_by_priority() {
        let tasks = sample();
        let filter = Filter { priority: Some(TaskPriority::High), ..Filter::default() };
        let ids: Vec<_> = filter_tasks(&tasks, &filter).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_search_matches_title() {
        let tasks = sample();
        let filter = Filter { search: "Task 2".to_string(), ..Filter::default() };
        let result = filter_tasks(&tasks, &filter);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, 2);
    }

    #[test]
    fn test_search_is_case_insensitive_over_description() {
        let tasks = sample();
        let filter = Filter { search: "numbers".to_string(), ..Filter::default() };
        let result = filter_tasks(&tasks, &filter);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, 3);
    }

    #[test]
    fn test_predicates_combine_with_and() {
        let tasks = sample();
        let filter = Filter {
            status: Some(TaskStatus::InProgress),
            priority: Some(TaskPriority::High),
            search: "task".to_string(),
        };
        assert!(filter_tasks(&tasks, &filter).is_empty());
    }

    #[test]
    fn test_count_by_status() {
        let counts = count_by_status(&sample());
        assert_eq!(counts, StatusCounts { todo: 1, in_progress: 1, done: 1 });
        assert_eq!(counts.total(), 3);
    }

    #[test]
    fn test_count_by_status_empty() {
        assert_eq!(count_by_status(&[]), StatusCounts::default());
    }

    #[test]
    fn test_filter_wire_format_uses_empty_for_any() {
        let filter = Filter { priority: Some(TaskPriority::High), ..Filter::default() };
        let json = serde_json::to_string(&filter).unwrap();
        assert_eq!(json, r#"{"status":"","priority":"HIGH","search":""}"#);
    }

    #[test]
    fn test_filter_parses_blank_wire_format() {
        let filter: Filter =
            serde_json::from_str(r#"{"status":"IN_PROGRESS","priority":"","search":"abc"}"#)
                .unwrap();
        assert_eq!(filter.status, Some(TaskStatus::InProgress));
        assert_eq!(filter.priority, None);
        assert_eq!(filter.search, "abc");
    }

    #[test]
    fn test_filter_rejects_unknown_status() {
        let parsed: std::result::Result<Filter, _> =
            serde_json::from_str(r#"{"status":"ARCHIVED","priority":"","search":""}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_filter_requires_exact_wire_names() {
        for raw in [
            r#"{"status":"in-progress","priority":"","search":""}"#,
            r#"{"status":"todo","priority":"","search":""}"#,
            r#"{"status":"","priority":"low","search":""}"#,
        ] {
            assert!(serde_json::from_str::<Filter>(raw).is_err(), "accepted {raw}");
        }
    }

    #[test]
    fn test_filter_rejects_wrong_shape() {
        assert!(serde_json::from_str::<Filter>("[1, 2, 3]").is_err());
        assert!(serde_json::from_str::<Filter>(r#"{"search": 42}"#).is_err());
    }

    fn arb_status() -> impl Strategy<Value = TaskStatus> {
        proptest::sample::select(TaskStatus::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn prop_buckets_sum_to_total(statuses in proptest::collection::vec(arb_status(), 0..64)) {
            let tasks: Vec<Task> = statuses
                .iter()
                .enumerate()
                .map(|(i, s)| task(i as u64, "t", "", *s, TaskPriority::Medium))
                .collect();
            prop_assert_eq!(count_by_status(&tasks).total(), tasks.len());
        }

        #[test]
        fn prop_filtered_is_ordered_subset(statuses in proptest::collection::vec(arb_status(), 0..32)) {
            let tasks: Vec<Task> = statuses
                .iter()
                .enumerate()
                .map(|(i, s)| task(i as u64, "t", "", *s, TaskPriority::Medium))
                .collect();
            let filter = Filter { status: Some(TaskStatus::Done), ..Filter::default() };
            let ids: Vec<u64> = filter_tasks(&tasks, &filter).iter().map(|t| t.id).collect();
            let mut sorted = ids.clone();
            sorted.sort_unstable();
            prop_assert_eq!(ids, sorted);
        }
    }
}
