//! Testing utilities and mock implementations.
//!
//! These types are provided for use in tests. They may appear unused in
//! the library itself but are consumed by unit and integration tests.

#![allow(dead_code)]

use crate::error::{Error, Result};
use crate::traits::{ApiRequest, ApiTransport, SlotStore};
use async_trait::async_trait;
use reqwest::Method;
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

type Expectation = (Method, String, Result<Value>, Option<Duration>);

/// A mock API transport for testing.
///
/// Expected requests are matched in order by method and path; each one
/// replays its canned response, optionally after a delay. Every request
/// received is recorded.
#[derive(Debug, Default)]
pub struct MockTransport {
    expectations: Mutex<VecDeque<Expectation>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    /// Create a new mock transport.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Expect a request and answer it with `response`.
    ///
    /// # Panics
    ///
    /// Panics if the expectation lock is poisoned.
    pub fn expect(&self, method: Method, path: &str, response: Value) {
        self.expectations.lock().unwrap().push_back((method, path.to_string(), Ok(response), None));
    }

    /// Expect a request and answer it with `response` once `delay` has passed.
    ///
    /// Requests are still matched in the order they are sent, so a longer
    /// delay on an earlier expectation makes its response arrive later.
    ///
    /// # Panics
    ///
    /// Panics if the expectation lock is poisoned.
    pub fn expect_delayed(&self, method: Method, path: &str, response: Value, delay: Duration) {
        self.expectations.lock().unwrap().push_back((
            method,
            path.to_string(),
            Ok(response),
            Some(delay),
        ));
    }

    /// Expect a request and fail it with `error`.
    ///
    /// # Panics
    ///
    /// Panics if the expectation lock is poisoned.
    pub fn expect_error(&self, method: Method, path: &str, error: Error) {
        self.expectations.lock().unwrap().push_back((method, path.to_string(), Err(error), None));
    }

    /// All requests received so far, in order.
    ///
    /// # Panics
    ///
    /// Panics if the request lock is poisoned.
    #[must_use]
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Verify all expected requests were made.
    ///
    /// # Panics
    ///
    /// Panics if not all expected requests were made.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().unwrap().len();
        assert_eq!(remaining, 0, "Expected {remaining} more API requests");
    }
}

#[async_trait]
impl ApiTransport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value> {
        self.requests.lock().unwrap().push(request.clone());

        let next = self.expectations.lock().unwrap().pop_front();
        let Some((method, path, response, delay)) = next else {
            panic!("Unexpected API request: {} {} (no more expectations)", request.method, request.path);
        };

        assert!(
            method == request.method && path == request.path,
            "Request mismatch:\n  Expected: {method} {path}\n  Got: {} {}",
            request.method,
            request.path
        );

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        response
    }
}

/// An in-memory slot store for testing.
#[derive(Debug, Default)]
pub struct MemorySlotStore {
    slots: Mutex<HashMap<String, String>>,
}

impl MemorySlotStore {
    /// Create an empty slot store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a slot store with one slot pre-populated.
    #[must_use]
    pub fn with_slot(key: &str, value: &str) -> Self {
        let store = Self::new();
        store.slots.lock().unwrap().insert(key.to_string(), value.to_string());
        store
    }

    /// Read a slot directly, bypassing the trait.
    ///
    /// # Panics
    ///
    /// Panics if the slot lock is poisoned.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        self.slots.lock().unwrap().get(key).cloned()
    }
}

impl SlotStore for MemorySlotStore {
    fn read_slot(&self, key: &str) -> Result<Option<String>> {
        Ok(self.get(key))
    }

    fn write_slot(&self, key: &str, value: &str) -> Result<()> {
        self.slots.lock().unwrap().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// A slot store whose every operation fails, for testing error paths.
#[derive(Debug, Default)]
pub struct FailingSlotStore;

impl SlotStore for FailingSlotStore {
    fn read_slot(&self, _key: &str) -> Result<Option<String>> {
        Err(std::io::Error::other("slot storage unavailable").into())
    }

    fn write_slot(&self, _key: &str, _value: &str) -> Result<()> {
        Err(std::io::Error::other("slot storage unavailable").into())
    }
}

/// A task in wire format with fixed dates, for canned responses.
#[must_use]
pub fn sample_task_json(id: u64, title: &str, status: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": format!("Desc {id}"),
        "status": status,
        "priority": "MEDIUM",
        "categoryId": 1,
        "dueDate": "2026-03-01",
        "createdAt": "2026-02-01T00:00:00Z",
        "updatedAt": "2026-02-01T00:00:00Z"
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_transport_replays_responses() {
        let transport = MockTransport::new();
        transport.expect(Method::GET, "/tasks", json!([]));

        let value = transport.send(ApiRequest::get("/tasks")).await.unwrap();
        assert_eq!(value, json!([]));
        assert_eq!(transport.requests().len(), 1);
        transport.verify();
    }

    #[tokio::test]
    async fn test_mock_transport_replays_errors() {
        let transport = MockTransport::new();
        transport.expect_error(Method::DELETE, "/tasks/1", Error::Unreachable);

        let result = transport.send(ApiRequest::delete("/tasks/1")).await;
        assert!(matches!(result, Err(Error::Unreachable)));
    }

    #[tokio::test]
    async fn test_mock_transport_delayed_responses_arrive_out_of_order() {
        let transport = MockTransport::new();
        transport.expect_delayed(Method::GET, "/tasks/1", json!(1), Duration::from_millis(40));
        transport.expect_delayed(Method::GET, "/tasks/2", json!(2), Duration::from_millis(5));

        let arrivals = Mutex::new(Vec::new());
        let fetch = |path: &'static str| {
            let transport = &transport;
            let arrivals = &arrivals;
            async move {
                let value = transport.send(ApiRequest::get(path)).await.unwrap();
                arrivals.lock().unwrap().push(value);
            }
        };
        tokio::join!(fetch("/tasks/1"), fetch("/tasks/2"));

        assert_eq!(arrivals.into_inner().unwrap(), vec![json!(2), json!(1)]);
        transport.verify();
    }

    #[tokio::test]
    #[should_panic(expected = "Request mismatch")]
    async fn test_mock_transport_wrong_path() {
        let transport = MockTransport::new();
        transport.expect(Method::GET, "/tasks", json!([]));

        let _ = transport.send(ApiRequest::get("/categories")).await;
    }

    #[tokio::test]
    #[should_panic(expected = "no more expectations")]
    async fn test_mock_transport_too_many_calls() {
        let transport = MockTransport::new();
        let _ = transport.send(ApiRequest::get("/tasks")).await;
    }

    #[test]
    #[should_panic(expected = "Expected 1 more API requests")]
    fn test_mock_transport_verify_fails() {
        let transport = MockTransport::new();
        transport.expect(Method::GET, "/tasks", json!([]));
        transport.verify();
    }

    #[test]
    fn test_memory_slot_store() {
        let store = MemorySlotStore::with_slot("a", "1");
        assert_eq!(store.read_slot("a").unwrap().as_deref(), Some("1"));
        store.write_slot("a", "2").unwrap();
        assert_eq!(store.get("a").as_deref(), Some("2"));
        assert!(store.read_slot("b").unwrap().is_none());
    }

    #[test]
    fn test_failing_slot_store() {
        let store = FailingSlotStore;
        assert!(store.read_slot("a").is_err());
        assert!(store.write_slot("a", "1").is_err());
    }
}
