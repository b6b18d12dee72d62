//! Axum route handlers for the Auth API.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{Method, StatusCode},
    Json,
};
use tracing::{debug, info};

use crate::auth::signup::{self, SignupRequest, SignupSuccess};
use crate::errors::AppError;
use crate::state::AppState;

/// ANY /api/auth/signup
///
/// Registered for every method so the validator answers non-POST requests
/// with its own `405` body. An unreadable body, including one where any field
/// is not a JSON string, counts as an empty payload.
pub async fn handle_signup(
    State(state): State<AppState>,
    method: Method,
    body: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SignupSuccess>), AppError> {
    let req = match body {
        Ok(Json(req)) => req,
        Err(rejection) => {
            debug!("Signup body rejected: {rejection}");
            SignupRequest::default()
        }
    };

    let (status, created) = signup::handle(&method, &req, state.account_ids.as_ref())?;
    info!(account_id = created.user.id.as_str(), "Mock account created");
    Ok((status, Json(created)))
}
