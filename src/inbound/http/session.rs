//! Session helpers so handlers avoid framework-specific session calls.
//!
//! A thin wrapper around the Actix cookie session exposing principal-level
//! operations. The authentication provider writes the principal here; the
//! gate and enricher middleware read the same key.

use actix_session::{Session, SessionExt};
use actix_web::dev::{Payload, ServiceRequest};
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;

use crate::domain::Principal;

pub(crate) const PRINCIPAL_KEY: &str = "user";

/// Read the principal out of a request's session, treating unreadable or
/// tampered cookies as an absent principal.
pub(crate) fn principal_from_request(req: &ServiceRequest) -> Option<Principal> {
    match req.get_session().get::<Principal>(PRINCIPAL_KEY) {
        Ok(principal) => principal,
        Err(error) => {
            tracing::warn!(%error, "unreadable session principal; treating as signed out");
            None
        }
    }
}

/// Newtype wrapper exposing higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Establish the session principal after a successful sign-in.
    pub fn sign_in(&self, principal: &Principal) -> Result<(), SessionWriteError> {
        self.0
            .insert(PRINCIPAL_KEY, principal)
            .map_err(|error| SessionWriteError {
                message: error.to_string(),
            })
    }

    /// Drop the whole session state.
    pub fn sign_out(&self) {
        self.0.purge();
    }

    /// Current principal, if any. Never fails: an unreadable cookie is
    /// logged and reads as signed out.
    pub fn principal(&self) -> Option<Principal> {
        match self.0.get::<Principal>(PRINCIPAL_KEY) {
            Ok(principal) => principal,
            Err(error) => {
                tracing::warn!(%error, "unreadable session principal; treating as signed out");
                None
            }
        }
    }
}

/// Failure to serialise the principal into the session cookie.
#[derive(Debug, thiserror::Error)]
#[error("failed to persist session principal: {message}")]
pub struct SessionWriteError {
    message: String,
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
