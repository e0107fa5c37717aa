//! View-context enricher.
//!
//! Copies the session principal, or its explicit absence, into request
//! extensions before any handler runs. Applied to every route, public ones
//! included, so navigation can render conditionally even outside the gated
//! subtree. Never fails; absence of a principal is an expected state, and
//! the context is request-scoped rather than ambient.

use std::task::{Context, Poll};

use actix_web::dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{Ready, ready};

use crate::domain::Principal;
use crate::inbound::http::session::principal_from_request;

/// Per-request rendering context: the signed-in principal, if any.
#[derive(Clone, Default)]
pub struct CurrentUser(Option<Principal>);

impl CurrentUser {
    pub fn principal(&self) -> Option<&Principal> {
        self.0.as_ref()
    }

    pub fn into_principal(self) -> Option<Principal> {
        self.0
    }
}

impl FromRequest for CurrentUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        // Absent extension means the enricher was not mounted (unit tests of
        // bare handlers); read as signed out rather than failing.
        ready(Ok(req
            .extensions()
            .get::<CurrentUser>()
            .cloned()
            .unwrap_or_default()))
    }
}

/// Enricher middleware populating [`CurrentUser`] on every request.
#[derive(Clone)]
pub struct PassPrincipalToView;

impl<S, B> Transform<S, ServiceRequest> for PassPrincipalToView
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = PassPrincipalToViewMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(PassPrincipalToViewMiddleware { service }))
    }
}

/// Service wrapper produced by [`PassPrincipalToView`].
pub struct PassPrincipalToViewMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for PassPrincipalToViewMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = S::Future;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let principal = principal_from_request(&req);
        req.extensions_mut().insert(CurrentUser(principal));
        self.service.call(req)
    }
}
