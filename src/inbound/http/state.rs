//! Shared HTTP adapter state.
//!
//! Handlers accept this via `actix_web::web::Data` so they depend only on
//! the repository port and stay testable without real I/O.

use std::sync::Arc;

use crate::domain::ports::UserRepository;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UserRepository>,
}

impl HttpState {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}
