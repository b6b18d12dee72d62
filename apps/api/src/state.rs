use std::sync::Arc;

use crate::auth::account_id::{AccountIdIssuer, RandomAccountIds};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable id issuer for mock signups. Default: RandomAccountIds.
    pub account_ids: Arc<dyn AccountIdIssuer>,
}

impl AppState {
    pub fn new() -> Self {
        AppState {
            account_ids: Arc::new(RandomAccountIds),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
