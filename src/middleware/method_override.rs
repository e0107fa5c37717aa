//! Method override for form transports.
//!
//! HTML forms can only submit GET and POST, so mutating routes accept a
//! `POST` carrying `_method=PUT` or `_method=DELETE` in the query string.
//! The rewrite happens before routing; only POST is ever rewritten and only
//! to PUT or DELETE.

use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::Method;
use futures_util::future::{Ready, ready};

const OVERRIDE_PARAM: &str = "_method";

fn override_from_query(query: &str) -> Option<Method> {
    let value = query
        .split('&')
        .find_map(|pair| pair.strip_prefix(OVERRIDE_PARAM)?.strip_prefix('='))?;
    match value.to_ascii_uppercase().as_str() {
        "PUT" => Some(Method::PUT),
        "DELETE" => Some(Method::DELETE),
        _ => None,
    }
}

/// Middleware rewriting overridden POST requests.
#[derive(Clone)]
pub struct MethodOverride;

impl<S, B> Transform<S, ServiceRequest> for MethodOverride
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = MethodOverrideMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(MethodOverrideMiddleware { service }))
    }
}

/// Service wrapper produced by [`MethodOverride`].
pub struct MethodOverrideMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for MethodOverrideMiddleware<S>
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

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        if req.method() == Method::POST {
            if let Some(method) = override_from_query(req.query_string()) {
                req.head_mut().method = method;
            }
        }
        self.service.call(req)
    }
}
