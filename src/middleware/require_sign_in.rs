//! Session gate protecting a route subtree.
//!
//! Wrapped once around the protected scope. Gating is a property of
//! composition order: routes registered before this middleware are public,
//! routes registered after it are protected. A request without a session
//! principal is redirected to the sign-in page and never reaches a handler.

use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::HttpResponse;
use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header;
use futures_util::future::{LocalBoxFuture, Ready, ready};

use crate::inbound::http::session::principal_from_request;

/// Entry point unauthenticated requests are sent to.
pub const SIGN_IN_PATH: &str = "/auth/sign-in";

/// Gate middleware. Fails closed: no principal, no handler.
#[derive(Clone)]
pub struct RequireSignIn;

impl<S, B> Transform<S, ServiceRequest> for RequireSignIn
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireSignInMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireSignInMiddleware { service }))
    }
}

/// Service wrapper produced by [`RequireSignIn`].
pub struct RequireSignInMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequireSignInMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if principal_from_request(&req).is_some() {
            let fut = self.service.call(req);
            return Box::pin(async move { Ok(fut.await?.map_into_left_body()) });
        }

        tracing::debug!(path = req.path(), "no session principal; redirecting to sign-in");
        let response = HttpResponse::Found()
            .insert_header((header::LOCATION, SIGN_IN_PATH))
            .finish();
        Box::pin(ready(Ok(req.into_response(response).map_into_right_body())))
    }
}
