//! Wires a RenderGuard around whole page handlers.
//!
//! Panics inside an async handler unwind through the tower stack, where
//! `CatchPanicLayer` stops them. The panic handler plays the guard's role for
//! that request: a fresh guard captures the payload and answers with the
//! fallback view.

use std::any::Any;

use axum::response::{IntoResponse, Response};
use tower_http::catch_panic::CatchPanicLayer;

use crate::guard::boundary::{RenderFailure, RenderGuard};
use crate::guard::sink::TracingSink;

pub type PanicHandler = fn(Box<dyn Any + Send + 'static>) -> Response;

const PAGE_COMPONENT: &str = "page handler";

pub fn page_guard() -> CatchPanicLayer<PanicHandler> {
    CatchPanicLayer::custom(render_panic_fallback as PanicHandler)
}

fn render_panic_fallback(payload: Box<dyn Any + Send + 'static>) -> Response {
    let mut guard = RenderGuard::new(PAGE_COMPONENT, TracingSink);
    guard.capture(RenderFailure::from_panic(PAGE_COMPONENT, payload.as_ref()));
    guard.fallback().into_response()
}
