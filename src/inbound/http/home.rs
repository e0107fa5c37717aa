//! Landing page, the only handler mounted before the enrichment-aware
//! public/protected split needs to care about sessions.

use actix_web::{HttpResponse, get};

use crate::inbound::http::{html, views};
use crate::middleware::CurrentUser;

/// `GET /` — public; renders principal-aware navigation either way.
#[get("/")]
pub async fn landing(current: CurrentUser) -> HttpResponse {
    html(views::landing_page(current.principal()))
}
