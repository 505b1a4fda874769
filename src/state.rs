//! Shared application state.

use crate::service::UserService;
use std::sync::Arc;

/// State handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// User use cases, shared across handlers.
    pub users: Arc<UserService>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(users: UserService) -> Self {
        Self {
            users: Arc::new(users),
        }
    }
}
