//! Signup validation.
//!
//! Checks run in a fixed order: HTTP method, field presence, password length.
//! The first failing check decides the response.

use axum::http::{Method, StatusCode};
use serde::{Deserialize, Serialize};

use crate::auth::account_id::AccountIdIssuer;
use crate::errors::AppError;
use crate::models::user::{NewAccount, Role};

pub const MIN_PASSWORD_LENGTH: usize = 8;

const MSG_FIELDS_REQUIRED: &str = "All fields are required";
const MSG_PASSWORD_TOO_SHORT: &str = "Password must be at least 8 characters";
const MSG_CREATED: &str = "Account created successfully";

/// Wire payload. Every field is optional so that absent and `null` values reach
/// the presence check instead of failing deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub fullname: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignupSuccess {
    pub success: bool,
    pub message: String,
    pub user: NewAccount,
}

/// Validates a signup attempt and manufactures the account on success.
///
/// Returns `201` with the new account, or the `AppError` whose response is the
/// matching `405` / `400` body.
pub fn handle(
    method: &Method,
    body: &SignupRequest,
    ids: &dyn AccountIdIssuer,
) -> Result<(StatusCode, SignupSuccess), AppError> {
    if *method != Method::POST {
        return Err(AppError::MethodNotAllowed);
    }

    let (Some(fullname), Some(email), Some(password)) = (
        present(&body.fullname),
        present(&body.email),
        present(&body.password),
    ) else {
        return Err(AppError::Validation(MSG_FIELDS_REQUIRED.to_string()));
    };

    // Length in UTF-16 code units, the unit browser clients measure in.
    if password.encode_utf16().count() < MIN_PASSWORD_LENGTH {
        return Err(AppError::Validation(MSG_PASSWORD_TOO_SHORT.to_string()));
    }

    let user = NewAccount {
        id: ids.issue(),
        fullname: fullname.to_string(),
        email: email.to_string(),
        role: Role::User,
    };

    Ok((
        StatusCode::CREATED,
        SignupSuccess {
            success: true,
            message: MSG_CREATED.to_string(),
            user,
        },
    ))
}

/// Missing, `null` and empty strings all count as absent.
fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}
