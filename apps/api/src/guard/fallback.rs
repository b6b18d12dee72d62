#![allow(dead_code)]

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use tracing::error;

pub const WARNING_ICON: &str = "\u{26A0}";
pub const TITLE: &str = "Something went wrong";
pub const MESSAGE: &str = "We apologize for the inconvenience. Please try refreshing the page.";

/// The single recovery offered by the fallback. An empty target reloads the
/// current document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveryAction {
    pub label: String,
    pub target: String,
}

impl RecoveryAction {
    pub fn reload() -> Self {
        Self::reload_to("")
    }

    pub fn reload_to(target: impl Into<String>) -> Self {
        RecoveryAction {
            label: "Refresh Page".to_string(),
            target: target.into(),
        }
    }
}

impl Default for RecoveryAction {
    fn default() -> Self {
        Self::reload()
    }
}

/// Fixed degraded view shown in place of a failed page.
#[derive(Debug, Clone, PartialEq, Eq, Template)]
#[template(path = "error_fallback.html")]
pub struct FallbackView {
    pub icon: &'static str,
    pub title: &'static str,
    pub message: &'static str,
    pub recovery: RecoveryAction,
}

impl FallbackView {
    pub fn new(recovery: RecoveryAction) -> Self {
        FallbackView {
            icon: WARNING_ICON,
            title: TITLE,
            message: MESSAGE,
            recovery,
        }
    }
}

impl Default for FallbackView {
    fn default() -> Self {
        Self::new(RecoveryAction::default())
    }
}

impl IntoResponse for FallbackView {
    fn into_response(self) -> Response {
        match self.render() {
            Ok(html) => (StatusCode::INTERNAL_SERVER_ERROR, Html(html)).into_response(),
            Err(e) => {
                error!("Fallback template failed to render: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, self.title).into_response()
            }
        }
    }
}
