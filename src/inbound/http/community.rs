//! Community browsing: read-only views over every registered user.

use actix_web::{HttpResponse, get, web};

use crate::domain::UserId;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{html, redirect, views};
use crate::middleware::{CurrentUser, SIGN_IN_PATH};

/// `GET /users` — every registered user, linked to their pantry view.
#[get("")]
pub async fn index(state: web::Data<HttpState>, current: CurrentUser) -> HttpResponse {
    let Some(principal) = current.into_principal() else {
        return redirect(SIGN_IN_PATH);
    };
    match state.users.load_all().await {
        Ok(users) => html(views::community_index_page(&principal, &users)),
        Err(error) => {
            tracing::error!(%error, "failed to list users");
            redirect("/")
        }
    }
}

/// `GET /users/{user_id}` — one user's pantry, read-only.
///
/// An unknown or unparseable identifier redirects back to the index rather
/// than rendering an error page.
#[get("/{user_id}")]
pub async fn show(
    state: web::Data<HttpState>,
    current: CurrentUser,
    path: web::Path<String>,
) -> HttpResponse {
    let Some(principal) = current.into_principal() else {
        return redirect(SIGN_IN_PATH);
    };
    let Ok(id) = path.parse::<UserId>() else {
        tracing::debug!(user_id = %*path, "unparseable user id");
        return redirect("/users");
    };
    match state.users.load(&id).await {
        Ok(user) => html(views::community_show_page(&principal, &user)),
        Err(error) => {
            tracing::debug!(%error, "requested user not found");
            redirect("/users")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::UserRepository;
    use crate::domain::user::{NewUser, PasswordHash, Username};
    use crate::domain::{Principal, User};
    use crate::inbound::http::session::SessionContext;
    use crate::middleware::PassPrincipalToView;
    use crate::outbound::persistence::InMemoryUserRepository;
    use actix_web::http::{StatusCode, header};
    use actix_web::{App, test};
    use std::sync::Arc;

    async fn seeded_user(repo: &InMemoryUserRepository, name: &str) -> User {
        repo.create(NewUser {
            username: Username::new(name).expect("valid username"),
            password_hash: PasswordHash::digest_of("pw"),
        })
        .await
        .expect("created")
    }

    fn community_app(
        repo: InMemoryUserRepository,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let state = HttpState::new(Arc::new(repo));
        App::new()
            .app_data(web::Data::new(state))
            .wrap(PassPrincipalToView)
            .wrap(crate::inbound::http::test_utils::test_session_middleware())
            .route(
                "/test-sign-in/{user_id}/{username}",
                web::get().to(
                    |session: SessionContext, path: web::Path<(String, String)>| async move {
                        let (id, name) = path.into_inner();
                        let principal = Principal::new(
                            id.parse().expect("fixture id"),
                            Username::new(name).expect("fixture username"),
                        );
                        session.sign_in(&principal).expect("principal persisted");
                        actix_web::HttpResponse::Ok()
                    },
                ),
            )
            .service(web::scope("/users").service(index).service(show))
    }

    async fn signed_in_cookie<S>(app: &S, user: &User) -> actix_web::cookie::Cookie<'static>
    where
        S: actix_web::dev::Service<
                actix_http::Request,
                Response = actix_web::dev::ServiceResponse,
                Error = actix_web::Error,
            >,
    {
        let res = test::call_service(
            app,
            test::TestRequest::get()
                .uri(&format!(
                    "/test-sign-in/{}/{}",
                    user.id(),
                    user.username()
                ))
                .to_request(),
        )
        .await;
        res.response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie")
            .into_owned()
    }

    #[actix_web::test]
    async fn index_lists_every_registered_user() {
        let repo = InMemoryUserRepository::new();
        let ada = seeded_user(&repo, "ada").await;
        seeded_user(&repo, "grace").await;
        let app = test::init_service(community_app(repo)).await;
        let cookie = signed_in_cookie(&app, &ada).await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/users")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = String::from_utf8_lossy(&test::read_body(res).await).into_owned();
        assert!(body.contains("ada"));
        assert!(body.contains("grace"));
    }

    #[actix_web::test]
    async fn show_renders_another_users_pantry_read_only() {
        let repo = InMemoryUserRepository::new();
        let ada = seeded_user(&repo, "ada").await;
        let mut grace = seeded_user(&repo, "grace").await;
        grace.pantry_mut().append(crate::domain::FoodDraft {
            name: "Flour".to_owned(),
        });
        repo.save(&grace).await.expect("saved");
        let app = test::init_service(community_app(repo)).await;
        let cookie = signed_in_cookie(&app, &ada).await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!("/users/{}", grace.id()))
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = String::from_utf8_lossy(&test::read_body(res).await).into_owned();
        assert!(body.contains("Flour"));
        // No mutation controls on someone else's pantry.
        assert!(!body.contains("_method"));
    }

    #[actix_web::test]
    async fn unknown_user_redirects_to_the_index() {
        let repo = InMemoryUserRepository::new();
        let ada = seeded_user(&repo, "ada").await;
        let app = test::init_service(community_app(repo)).await;
        let cookie = signed_in_cookie(&app, &ada).await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/users/3fa85f64-5717-4562-b3fc-2c963f66afa6")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(
            res.headers()
                .get(header::LOCATION)
                .and_then(|v| v.to_str().ok()),
            Some("/users")
        );
    }
}
