//! Authentication provider: sign-up, sign-in, sign-out.
//!
//! Establishes and clears the session principal. These routes are composed
//! before the gate, so they stay reachable while signed out. Credential
//! checks live here to keep handlers focused on request/response mapping.

use std::fmt;

use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use zeroize::Zeroizing;

use crate::domain::user::{NewUser, PasswordHash, Username};
use crate::domain::{Principal, User};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{html, redirect, views};
use crate::middleware::SIGN_IN_PATH;

/// Sign-up form body.
#[derive(Deserialize)]
pub struct SignUpForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

/// Sign-in form body.
#[derive(Deserialize)]
pub struct SignInForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Validated credentials with the raw password held only in zeroised memory.
pub struct Credentials {
    username: Username,
    password: Zeroizing<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsError {
    EmptyUsername,
    EmptyPassword,
}

impl fmt::Display for CredentialsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for CredentialsError {}

impl Credentials {
    /// Construct credentials from raw form inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, CredentialsError> {
        let username = Username::new(username).map_err(|_| CredentialsError::EmptyUsername)?;
        if password.is_empty() {
            return Err(CredentialsError::EmptyPassword);
        }
        Ok(Self {
            username,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Hash the password for storage.
    pub fn hash(&self) -> PasswordHash {
        PasswordHash::digest_of(&self.password)
    }

    /// Check these credentials against a stored aggregate.
    fn authenticate(&self, user: &User) -> bool {
        user.username() == &self.username && user.password_hash().matches(&self.password)
    }
}

/// `GET /auth/sign-up`
#[get("/sign-up")]
pub async fn sign_up_form() -> HttpResponse {
    html(views::sign_up_page(None))
}

/// `POST /auth/sign-up` — register and send the user to sign-in.
#[post("/sign-up")]
pub async fn sign_up(state: web::Data<HttpState>, form: web::Form<SignUpForm>) -> HttpResponse {
    let form = form.into_inner();
    if form.password != form.confirm_password {
        return html(views::sign_up_page(Some("passwords do not match")));
    }
    let credentials = match Credentials::try_from_parts(&form.username, &form.password) {
        Ok(credentials) => credentials,
        Err(error) => return html(views::sign_up_page(Some(&error.to_string()))),
    };

    let new_user = NewUser {
        username: credentials.username().clone(),
        password_hash: credentials.hash(),
    };
    match state.users.create(new_user).await {
        Ok(user) => {
            tracing::info!(user_id = %user.id(), "user registered");
            redirect(SIGN_IN_PATH)
        }
        Err(error) => {
            tracing::error!(%error, "registration failed");
            redirect("/")
        }
    }
}

/// `GET /auth/sign-in`
#[get("/sign-in")]
pub async fn sign_in_form() -> HttpResponse {
    html(views::sign_in_page(None))
}

/// `POST /auth/sign-in` — establish the session principal.
///
/// Handles are not unique; the first matching aggregate in creation order
/// wins, matching the store's lookup semantics.
#[post("/sign-in")]
pub async fn sign_in(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<SignInForm>,
) -> HttpResponse {
    let form = form.into_inner();
    let credentials = match Credentials::try_from_parts(&form.username, &form.password) {
        Ok(credentials) => credentials,
        Err(error) => return html(views::sign_in_page(Some(&error.to_string()))),
    };

    let users = match state.users.load_all().await {
        Ok(users) => users,
        Err(error) => {
            tracing::error!(%error, "user lookup failed during sign-in");
            return redirect("/");
        }
    };

    let Some(user) = users.iter().find(|user| credentials.authenticate(user)) else {
        return html(views::sign_in_page(Some("invalid credentials")));
    };

    if let Err(error) = session.sign_in(&Principal::for_user(user)) {
        tracing::error!(%error, user_id = %user.id(), "session establishment failed");
        return redirect(SIGN_IN_PATH);
    }
    tracing::info!(user_id = %user.id(), "session established");
    redirect("/")
}

/// `GET /auth/sign-out` — drop the session and return home.
#[get("/sign-out")]
pub async fn sign_out(session: SessionContext) -> HttpResponse {
    session.sign_out();
    redirect("/")
}
