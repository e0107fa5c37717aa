//! Pantry CRUD handlers: the authenticated embedded-collection operations.
//!
//! Every mutating operation follows load owner → locate/mutate item → save
//! owner, and answers with a redirect: to the owner's list view on success
//! (commit and re-display), to the application root when the owner cannot be
//! loaded or the save fails. Failures are logged for operators and never
//! surface to the client.
//!
//! The owner is always resolved from the session principal. The `{user_id}`
//! path segment is decorative: it is compared against the principal and
//! logged when they disagree, but it is never trusted.

use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::domain::pantry::{FoodDraft, FoodId};
use crate::domain::ports::UserPersistenceError;
use crate::domain::{Principal, User};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{html, redirect, views};
use crate::middleware::{CurrentUser, SIGN_IN_PATH};

fn warn_on_foreign_owner(path_owner: &str, principal: &Principal) {
    match path_owner.parse::<crate::domain::UserId>() {
        Ok(claimed) if &claimed != principal.id() => {
            tracing::warn!(
                %claimed,
                owner = %principal.id(),
                "path claims another owner; operating on the session principal"
            );
        }
        Ok(_) => {}
        Err(_) => {
            tracing::debug!(path_owner, "unparseable owner segment in path");
        }
    }
}

/// Load the owner identified by the principal, logging the failure.
async fn load_owner(state: &HttpState, principal: &Principal) -> Option<User> {
    match state.users.load(principal.id()).await {
        Ok(user) => Some(user),
        Err(error) => {
            tracing::error!(%error, owner = %principal.id(), "failed to load pantry owner");
            None
        }
    }
}

/// Save the owner, logging validation or store failures.
async fn save_owner(state: &HttpState, user: &User) -> Result<(), UserPersistenceError> {
    state.users.save(user).await.inspect_err(|error| {
        tracing::error!(%error, owner = %user.id(), "failed to save pantry owner");
    })
}

/// `GET /users/{user_id}/foods` — the owner's items in stored order.
#[get("")]
pub async fn index(
    state: web::Data<HttpState>,
    current: CurrentUser,
    path: web::Path<String>,
) -> HttpResponse {
    let Some(principal) = current.into_principal() else {
        return redirect(SIGN_IN_PATH);
    };
    warn_on_foreign_owner(&path, &principal);

    match load_owner(&state, &principal).await {
        Some(user) => html(views::pantry_index_page(&principal, user.pantry().items())),
        None => redirect("/"),
    }
}

/// `GET /users/{user_id}/foods/new` — create form; no data access.
#[get("/new")]
pub async fn new_form(current: CurrentUser, path: web::Path<String>) -> HttpResponse {
    let Some(principal) = current.into_principal() else {
        return redirect(SIGN_IN_PATH);
    };
    warn_on_foreign_owner(&path, &principal);
    html(views::food_new_page(&principal))
}

/// `POST /users/{user_id}/foods` — append a new item and save.
///
/// The append is attempted even when the name is blank; the persistence
/// layer rejects that save and nothing is committed.
#[post("")]
pub async fn create(
    state: web::Data<HttpState>,
    current: CurrentUser,
    path: web::Path<String>,
    form: web::Form<FoodDraft>,
) -> HttpResponse {
    let Some(principal) = current.into_principal() else {
        return redirect(SIGN_IN_PATH);
    };
    warn_on_foreign_owner(&path, &principal);

    let Some(mut user) = load_owner(&state, &principal).await else {
        return redirect("/");
    };
    user.pantry_mut().append(form.into_inner());
    match save_owner(&state, &user).await {
        Ok(()) => redirect(&views::foods_path(principal.id())),
        Err(_) => redirect("/"),
    }
}

/// `GET /users/{user_id}/foods/{item_id}/edit` — edit form for one item.
///
/// A missing item is treated as not-found and redirected to the list view
/// rather than rendering a form over absent data.
#[get("/{item_id}/edit")]
pub async fn edit_form(
    state: web::Data<HttpState>,
    current: CurrentUser,
    path: web::Path<(String, String)>,
) -> HttpResponse {
    let Some(principal) = current.into_principal() else {
        return redirect(SIGN_IN_PATH);
    };
    let (path_owner, item_id) = path.into_inner();
    warn_on_foreign_owner(&path_owner, &principal);

    let Some(user) = load_owner(&state, &principal).await else {
        return redirect("/");
    };
    let item = item_id
        .parse::<FoodId>()
        .ok()
        .and_then(|id| user.pantry().get(&id));
    match item {
        Some(item) => html(views::food_edit_page(&principal, item)),
        None => {
            tracing::debug!(%item_id, owner = %principal.id(), "edit target not found");
            redirect(&views::foods_path(principal.id()))
        }
    }
}

/// `PUT /users/{user_id}/foods/{item_id}` — total overwrite of the located
/// item's fields, then save.
#[put("/{item_id}")]
pub async fn update(
    state: web::Data<HttpState>,
    current: CurrentUser,
    path: web::Path<(String, String)>,
    form: web::Form<FoodDraft>,
) -> HttpResponse {
    let Some(principal) = current.into_principal() else {
        return redirect(SIGN_IN_PATH);
    };
    let (path_owner, item_id) = path.into_inner();
    warn_on_foreign_owner(&path_owner, &principal);

    let Some(mut user) = load_owner(&state, &principal).await else {
        return redirect("/");
    };
    let list = views::foods_path(principal.id());
    let Some(id) = item_id.parse::<FoodId>().ok() else {
        return redirect(&list);
    };
    if !user.pantry_mut().set(&id, form.into_inner()) {
        tracing::debug!(%id, owner = %principal.id(), "update target not found");
        return redirect(&list);
    }
    match save_owner(&state, &user).await {
        Ok(()) => redirect(&list),
        Err(_) => redirect("/"),
    }
}

/// `DELETE /users/{user_id}/foods/{item_id}` — remove the matching item and
/// save. An unmatched identity is a silent no-op, so the operation is
/// idempotent.
#[delete("/{item_id}")]
pub async fn delete(
    state: web::Data<HttpState>,
    current: CurrentUser,
    path: web::Path<(String, String)>,
) -> HttpResponse {
    let Some(principal) = current.into_principal() else {
        return redirect(SIGN_IN_PATH);
    };
    let (path_owner, item_id) = path.into_inner();
    warn_on_foreign_owner(&path_owner, &principal);

    let Some(mut user) = load_owner(&state, &principal).await else {
        return redirect("/");
    };
    if let Ok(id) = item_id.parse::<FoodId>() {
        user.pantry_mut().remove(&id);
    }
    match save_owner(&state, &user).await {
        Ok(()) => redirect(&views::foods_path(principal.id())),
        Err(_) => redirect("/"),
    }
}
