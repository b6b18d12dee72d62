#![allow(dead_code)]

//! RenderGuard: the failure boundary wrapped around page rendering.
//!
//! Lifecycle per guard:
//! 1. `render(children)` runs the children closure and passes its output through.
//! 2. If the children return `Err` or panic, the failure is captured:
//!    `derive_state` computes the next state (pure), `on_caught` reports it.
//! 3. The state latches at `has_failed = true`. Every later `render` returns the
//!    fallback without running the children. Only a new guard starts clean.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};

use crate::guard::fallback::{FallbackView, RecoveryAction};
use crate::guard::sink::DiagnosticSink;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Error,
    Panic,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Error => f.write_str("error"),
            FailureKind::Panic => f.write_str("panic"),
        }
    }
}

/// A captured descendant failure. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderFailure {
    message: String,
    component: String,
    kind: FailureKind,
    captured_at: DateTime<Utc>,
}

impl RenderFailure {
    pub fn from_error(component: &str, err: &anyhow::Error) -> Self {
        Self::new(component, format!("{err:#}"), FailureKind::Error)
    }

    pub fn from_panic(component: &str, payload: &(dyn Any + Send)) -> Self {
        Self::new(component, panic_message(payload), FailureKind::Panic)
    }

    fn new(component: &str, message: String, kind: FailureKind) -> Self {
        RenderFailure {
            message,
            component: component.to_string(),
            kind,
            captured_at: Utc::now(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Which descendant failed.
    pub fn component(&self) -> &str {
        &self.component
    }

    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }
}

/// Extracts the text of a `panic!` payload.
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuardState {
    pub has_failed: bool,
    pub failure: Option<RenderFailure>,
}

/// The two hooks a failure boundary exposes to whatever drives rendering.
pub trait FailureBoundary {
    /// Post-failure state. Must be pure: it may be called speculatively and
    /// must not log or touch `self`.
    fn derive_state(failure: &RenderFailure) -> GuardState
    where
        Self: Sized;

    /// Reports a captured failure. Must never panic.
    fn on_caught(&mut self, failure: &RenderFailure);
}

/// Output of a guarded render: the children's own output, or the fallback.
#[derive(Debug, PartialEq)]
pub enum Rendered<T> {
    Children(T),
    Fallback(FallbackView),
}

impl<T: IntoResponse> IntoResponse for Rendered<T> {
    fn into_response(self) -> Response {
        match self {
            Rendered::Children(output) => output.into_response(),
            Rendered::Fallback(view) => view.into_response(),
        }
    }
}

pub struct RenderGuard<S> {
    component: String,
    sink: S,
    recovery: RecoveryAction,
    state: GuardState,
}

impl<S: DiagnosticSink> RenderGuard<S> {
    pub fn new(component: impl Into<String>, sink: S) -> Self {
        RenderGuard {
            component: component.into(),
            sink,
            recovery: RecoveryAction::default(),
            state: GuardState::default(),
        }
    }

    /// Overrides where the fallback's recovery action points.
    pub fn with_recovery(mut self, recovery: RecoveryAction) -> Self {
        self.recovery = recovery;
        self
    }

    pub fn component(&self) -> &str {
        &self.component
    }

    pub fn state(&self) -> &GuardState {
        &self.state
    }

    pub fn has_failed(&self) -> bool {
        self.state.has_failed
    }

    pub fn render<T, F>(&mut self, children: F) -> Rendered<T>
    where
        F: FnOnce() -> anyhow::Result<T>,
    {
        if self.state.has_failed {
            return Rendered::Fallback(self.fallback());
        }

        // Partial output is discarded on unwind.
        let failure = match panic::catch_unwind(AssertUnwindSafe(children)) {
            Ok(Ok(output)) => return Rendered::Children(output),
            Ok(Err(err)) => RenderFailure::from_error(&self.component, &err),
            Err(payload) => RenderFailure::from_panic(&self.component, payload.as_ref()),
        };

        self.capture(failure);
        Rendered::Fallback(self.fallback())
    }

    /// Processes one failure: derive, report, latch.
    /// Every call is reported; only the first one is kept in the state.
    pub fn capture(&mut self, failure: RenderFailure) {
        let next = Self::derive_state(&failure);
        self.on_caught(&failure);
        if !self.state.has_failed {
            self.state = next;
        }
    }

    pub fn fallback(&self) -> FallbackView {
        FallbackView::new(self.recovery.clone())
    }
}

impl<S: DiagnosticSink> FailureBoundary for RenderGuard<S> {
    fn derive_state(failure: &RenderFailure) -> GuardState {
        GuardState {
            has_failed: true,
            failure: Some(failure.clone()),
        }
    }

    fn on_caught(&mut self, failure: &RenderFailure) {
        let sink = &self.sink;
        // A panicking sink must not take the guard down with it.
        let _ = panic::catch_unwind(AssertUnwindSafe(|| sink.record(failure)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSink {
        records: Mutex<Vec<RenderFailure>>,
    }

    impl RecordingSink {
        fn count(&self) -> usize {
            self.records.lock().unwrap().len()
        }
    }

    impl DiagnosticSink for RecordingSink {
        fn record(&self, failure: &RenderFailure) {
            self.records.lock().unwrap().push(failure.clone());
        }
    }

    struct PanickingSink;

    impl DiagnosticSink for PanickingSink {
        fn record(&self, _failure: &RenderFailure) {
            panic!("sink exploded");
        }
    }

    fn failure(msg: &str) -> RenderFailure {
        RenderFailure::from_error("widget", &anyhow::anyhow!(msg.to_string()))
    }

    #[test]
    fn test_initial_state_is_clean() {
        let sink = RecordingSink::default();
        let guard = RenderGuard::new("page", &sink);
        assert_eq!(guard.state(), &GuardState::default());
        assert!(!guard.has_failed());
        assert!(guard.state().failure.is_none());
    }

    #[test]
    fn test_passes_children_through_unchanged() {
        let sink = RecordingSink::default();
        let mut guard = RenderGuard::new("page", &sink);
        let out = guard.render(|| Ok("<p>hello</p>".to_string()));
        assert_eq!(out, Rendered::Children("<p>hello</p>".to_string()));
        assert!(!guard.has_failed());
        assert_eq!(sink.count(), 0);
    }

    #[test]
    fn test_error_from_children_shows_fallback() {
        let sink = RecordingSink::default();
        let mut guard = RenderGuard::new("job list", &sink);
        let out: Rendered<String> = guard.render(|| Err(anyhow::anyhow!("template missing")));

        assert!(matches!(out, Rendered::Fallback(_)));
        assert!(guard.has_failed());
        let captured = guard.state().failure.as_ref().unwrap();
        assert_eq!(captured.kind(), FailureKind::Error);
        assert_eq!(captured.component(), "job list");
        assert_eq!(captured.message(), "template missing");
        assert_eq!(sink.count(), 1);
    }

    #[test]
    fn test_panic_from_children_is_contained() {
        let sink = RecordingSink::default();
        let mut guard = RenderGuard::new("cv view", &sink);
        let out: Rendered<String> = guard.render(|| panic!("index out of range"));

        assert!(matches!(out, Rendered::Fallback(_)));
        let captured = guard.state().failure.as_ref().unwrap();
        assert_eq!(captured.kind(), FailureKind::Panic);
        assert_eq!(captured.message(), "index out of range");
    }

    #[test]
    fn test_state_stays_latched_after_failure() {
        let sink = RecordingSink::default();
        let mut guard = RenderGuard::new("page", &sink);
        let _: Rendered<String> = guard.render(|| Err(anyhow::anyhow!("boom")));

        let mut ran = false;
        let out = guard.render(|| {
            ran = true;
            Ok("fine now".to_string())
        });

        assert!(!ran, "children must not run once the guard has failed");
        assert!(matches!(out, Rendered::Fallback(_)));
        assert!(guard.has_failed());
    }

    #[test]
    fn test_every_failure_logged_but_first_kept() {
        let sink = RecordingSink::default();
        let mut guard = RenderGuard::new("page", &sink);
        guard.capture(failure("first"));
        guard.capture(failure("second"));
        guard.capture(failure("third"));

        assert_eq!(sink.count(), 3);
        assert!(guard.has_failed());
        assert_eq!(guard.state().failure.as_ref().unwrap().message(), "first");
    }

    #[test]
    fn test_derive_state_is_pure_and_deterministic() {
        let sink = RecordingSink::default();
        let _guard = RenderGuard::new("page", &sink);
        let f = failure("boom");

        let a = RenderGuard::<&RecordingSink>::derive_state(&f);
        let b = RenderGuard::<&RecordingSink>::derive_state(&f);

        assert_eq!(a, b);
        assert!(a.has_failed);
        assert_eq!(a.failure.as_ref(), Some(&f));
        assert_eq!(sink.count(), 0);
    }

    #[test]
    fn test_on_caught_survives_panicking_sink() {
        let mut guard = RenderGuard::new("page", PanickingSink);
        let out: Rendered<String> = guard.render(|| Err(anyhow::anyhow!("boom")));
        assert!(matches!(out, Rendered::Fallback(_)));
        assert!(guard.has_failed());
    }

    #[test]
    fn test_error_context_chain_is_kept() {
        let err = anyhow::anyhow!("file not found").context("loading header partial");
        let f = RenderFailure::from_error("layout", &err);
        assert_eq!(f.message(), "loading header partial: file not found");
    }

    #[test]
    fn test_panic_message_variants() {
        let owned: Box<dyn Any + Send> = Box::new(String::from("owned"));
        let borrowed: Box<dyn Any + Send> = Box::new("borrowed");
        let other: Box<dyn Any + Send> = Box::new(42_u8);
        assert_eq!(panic_message(owned.as_ref()), "owned");
        assert_eq!(panic_message(borrowed.as_ref()), "borrowed");
        assert_eq!(panic_message(other.as_ref()), "non-string panic payload");
    }

    #[test]
    fn test_fallback_uses_configured_recovery() {
        let sink = RecordingSink::default();
        let mut guard = RenderGuard::new("page", &sink)
            .with_recovery(RecoveryAction::reload_to("/jobs"));
        let out: Rendered<String> = guard.render(|| Err(anyhow::anyhow!("boom")));
        match out {
            Rendered::Fallback(view) => assert_eq!(view.recovery.target, "/jobs"),
            Rendered::Children(_) => panic!("expected fallback"),
        }
    }
}
