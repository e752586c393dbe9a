//! Common test helpers for integration tests.
//!
//! Provides substitute processors, an in-process request driver for the
//! router, and a tracing layer that captures log messages.
//!
//! # Note
//!
//! `#![allow(dead_code)]` is needed because each integration test file is a
//! separate crate and uses only part of these helpers.

#![allow(dead_code)]

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use tower::ServiceExt;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

use prompt_processing_api::domain::{ProcessingRequest, ProcessingResponse};
use prompt_processing_api::infrastructure::{
    CancellationSignal, ProcessingError, PromptProcessor, SimulatedProcessor,
};

// =============================================================================
// Substitute Processors
// =============================================================================

/// Wraps a [`SimulatedProcessor`] and counts calls.
#[derive(Debug, Default)]
pub struct CountingProcessor {
    inner: SimulatedProcessor,
    calls: AtomicUsize,
}

impl CountingProcessor {
    /// Creates a counting processor with no simulated delay.
    pub fn immediate() -> Self {
        Self {
            inner: SimulatedProcessor::new(std::time::Duration::ZERO),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of times `process` was called.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl PromptProcessor for CountingProcessor {
    async fn process(
        &self,
        request: Option<ProcessingRequest>,
        signal: CancellationSignal,
    ) -> Result<ProcessingResponse, ProcessingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.process(request, signal).await
    }
}

/// Always fails with an internal error carrying `detail`.
pub struct FailingProcessor {
    pub detail: String,
}

impl PromptProcessor for FailingProcessor {
    async fn process(
        &self,
        _request: Option<ProcessingRequest>,
        _signal: CancellationSignal,
    ) -> Result<ProcessingResponse, ProcessingError> {
        Err(ProcessingError::Internal(self.detail.clone()))
    }
}

/// Panics inside the processing task.
pub struct PanickingProcessor;

impl PromptProcessor for PanickingProcessor {
    async fn process(
        &self,
        _request: Option<ProcessingRequest>,
        _signal: CancellationSignal,
    ) -> Result<ProcessingResponse, ProcessingError> {
        panic!("processor exploded with internal secret");
    }
}

// =============================================================================
// Request Helpers
// =============================================================================

/// Sends a POST with a raw body to the router.
pub async fn post_raw(app: Router, uri: &str, body: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    send(app, request).await
}

/// Sends a POST with a JSON body to the router.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    post_raw(app, uri, &body.to_string()).await
}

/// Sends a GET to the router and returns the status and raw body.
pub async fn get_text(app: Router, uri: &str) -> (StatusCode, String) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

/// Sends a GET to the router and parses the body as JSON.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let (status, text) = get_text(app, uri).await;
    (status, serde_json::from_str(&text).unwrap())
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

// =============================================================================
// Log Capture
// =============================================================================

/// A captured log event: its level and rendered text.
#[derive(Debug, Clone)]
pub struct CapturedEvent {
    pub level: Level,
    /// The `message` followed by every other field as ` name=value`.
    pub text: String,
}

/// Tracing layer that records the level and fields of every event.
#[derive(Clone, Default)]
pub struct CapturedLogs {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl CapturedLogs {
    /// Installs a capturing subscriber for the current thread.
    ///
    /// Tests using this must run on a current-thread runtime so that spawned
    /// tasks log through the same subscriber.
    pub fn install() -> (Self, tracing::subscriber::DefaultGuard) {
        let logs = Self::default();
        let subscriber = tracing_subscriber::registry().with(logs.clone());
        let guard = tracing::subscriber::set_default(subscriber);
        (logs, guard)
    }

    /// Snapshot of captured events.
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Returns true if any captured event contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.events().iter().any(|event| event.text.contains(needle))
    }

    /// Returns true if an event at `level` contains `needle`.
    pub fn contains_at(&self, level: Level, needle: &str) -> bool {
        self.events()
            .iter()
            .any(|event| event.level == level && event.text.contains(needle))
    }

    /// Number of events recorded at `level`.
    pub fn count_at(&self, level: Level) -> usize {
        self.events()
            .iter()
            .filter(|event| event.level == level)
            .count()
    }
}

impl<S: Subscriber> Layer<S> for CapturedLogs {
    fn on_event(&self, event: &Event<'_>, _context: Context<'_, S>) {
        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            text: format!("{}{}", visitor.message, visitor.fields),
        });
    }
}

#[derive(Default)]
struct EventVisitor {
    message: String,
    fields: String,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.fields.push_str(&format!(" {}={value:?}", field.name()));
        }
    }
}
