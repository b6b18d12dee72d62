pub mod health;
pub mod pages;

use std::any::Any;

use axum::{
    response::{IntoResponse, Response},
    routing::{any, get},
    Router,
};
use tower_http::catch_panic::CatchPanicLayer;

use crate::auth::handlers;
use crate::errors::AppError;
use crate::guard::{boundary::panic_message, page_guard, PanicHandler};
use crate::state::AppState;

async fn not_found() -> AppError {
    AppError::NotFound
}

/// API handlers answer a panic with the JSON internal-error body instead of
/// the HTML fallback page.
fn api_panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    AppError::Internal(anyhow::anyhow!(
        "handler panicked: {}",
        panic_message(payload.as_ref())
    ))
    .into_response()
}

pub fn build_router(state: AppState) -> Router {
    let api: Router<AppState> = Router::new()
        .route("/api/auth/signup", any(handlers::handle_signup))
        .layer(CatchPanicLayer::custom(api_panic_response as PanicHandler));

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/", get(pages::index_handler).layer(page_guard()))
        .merge(api)
        .fallback(not_found)
        .with_state(state)
}
