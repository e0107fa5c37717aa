//! HTTP inbound adapter: handlers, session plumbing, and view rendering.

pub mod auth;
pub mod community;
pub mod foods;
pub mod home;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod views;

use actix_web::HttpResponse;
use actix_web::http::header;

/// 302 redirect, the only way a failed or completed mutation answers.
pub(crate) fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Render markup as a 200 HTML response.
pub(crate) fn html(markup: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(actix_web::http::header::ContentType::html())
        .body(markup)
}
