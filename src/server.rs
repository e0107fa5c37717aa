//! Server assembly: configuration, middleware stack, and route table.

use std::env;
use std::io;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::MessageBody;
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, Error, HttpServer, web};
use tracing::warn;
use zeroize::Zeroize;

use crate::inbound::http::state::HttpState;
use crate::inbound::http::{auth, community, foods, home};
use crate::middleware::{MethodOverride, PassPrincipalToView, RequestLog, RequireSignIn};

/// Shortest session key material accepted for cookie signing.
const SESSION_KEY_MIN_LEN: usize = 32;

/// Load the session key from a file, zeroizing the raw bytes after use.
///
/// A key file that exists but is too short is always an error; only a
/// missing or unreadable file may fall back to an ephemeral key, and only
/// in debug builds or when explicitly allowed.
fn read_session_key(path: &str, allow_ephemeral: bool) -> io::Result<Key> {
    match std::fs::read(path) {
        Ok(mut bytes) => {
            if bytes.len() < SESSION_KEY_MIN_LEN {
                bytes.zeroize();
                return Err(io::Error::other(format!(
                    "session key at {path} is too short: need at least \
                     {SESSION_KEY_MIN_LEN} bytes"
                )));
            }
            let key = Key::derive_from(&bytes);
            bytes.zeroize();
            Ok(key)
        }
        Err(e) => {
            if cfg!(debug_assertions) || allow_ephemeral {
                warn!(path = %path, error = %e, "using temporary session key (dev only)");
                Ok(Key::generate())
            } else {
                Err(io::Error::other(format!(
                    "failed to read session key at {path}: {e}"
                )))
            }
        }
    }
}

/// Runtime settings resolved once at startup.
#[derive(Clone)]
pub struct ServerConfig {
    pub key: Key,
    pub cookie_secure: bool,
    pub port: u16,
}

impl ServerConfig {
    /// Resolve configuration from the environment.
    ///
    /// The session key is read from `SESSION_KEY_FILE`; a missing key is
    /// fatal in release builds unless `SESSION_ALLOW_EPHEMERAL=1` opts into
    /// a generated one. `SESSION_COOKIE_SECURE=0` disables the secure cookie
    /// flag for plain-HTTP development, and `PORT` overrides the bind port.
    pub fn from_env() -> io::Result<Self> {
        let key_path =
            env::var("SESSION_KEY_FILE").unwrap_or_else(|_| "/var/run/secrets/session_key".into());
        let allow_ephemeral = env::var("SESSION_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
        let key = read_session_key(&key_path, allow_ephemeral)?;

        let cookie_secure = env::var("SESSION_COOKIE_SECURE")
            .map(|v| v != "0")
            .unwrap_or(true);

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|e| io::Error::other(format!("invalid PORT {raw:?}: {e}")))?,
            Err(_) => 8080,
        };

        Ok(Self {
            key,
            cookie_secure,
            port,
        })
    }
}

/// Assemble the application: middleware stack plus the full route table.
///
/// Wrap registration is bottom-up, so requests traverse the request log,
/// then the method override, then session loading, then the view-context
/// enricher, before routing. The sign-in gate wraps only the `/users`
/// subtree; the landing and auth pages stay public.
pub fn build_app(
    state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_same_site(SameSite::Lax)
        .build();

    // Item routes register before the single-user view so `/foods` paths
    // never fall through to it.
    let protected = web::scope("/users")
        .wrap(RequireSignIn)
        .service(
            web::scope("/{user_id}/foods")
                .service(foods::index)
                .service(foods::new_form)
                .service(foods::create)
                .service(foods::edit_form)
                .service(foods::update)
                .service(foods::delete),
        )
        .service(community::index)
        .service(community::show);

    App::new()
        .app_data(state)
        .wrap(PassPrincipalToView)
        .wrap(session)
        .wrap(MethodOverride)
        .wrap(RequestLog)
        .service(home::landing)
        .service(
            web::scope("/auth")
                .service(auth::sign_up_form)
                .service(auth::sign_up)
                .service(auth::sign_in_form)
                .service(auth::sign_in)
                .service(auth::sign_out),
        )
        .service(protected)
}

/// Bind the HTTP server without starting the runtime.
pub fn create_server(config: ServerConfig, state: web::Data<HttpState>) -> io::Result<Server> {
    let ServerConfig {
        key,
        cookie_secure,
        port,
    } = config;
    let server = HttpServer::new(move || build_app(state.clone(), key.clone(), cookie_secure))
        .bind(("0.0.0.0", port))?
        .run();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    struct KeyFile(PathBuf);

    impl KeyFile {
        fn with_bytes(name: &str, bytes: &[u8]) -> Self {
            let path = env::temp_dir().join(format!("pantry-key-{name}-{}", uuid::Uuid::new_v4()));
            fs::write(&path, bytes).expect("key file written");
            Self(path)
        }

        fn path(&self) -> &str {
            self.0.to_str().expect("utf-8 temp path")
        }
    }

    impl Drop for KeyFile {
        fn drop(&mut self) {
            let _ = fs::remove_file(&self.0);
        }
    }

    #[test]
    fn short_key_file_is_an_error_not_a_panic() {
        let file = KeyFile::with_bytes("short", &[7u8; 10]);
        let err = read_session_key(file.path(), true)
            .err()
            .expect("short key rejected");
        assert!(err.to_string().contains("too short"), "{err}");
    }

    #[test]
    fn adequate_key_file_is_accepted() {
        let file = KeyFile::with_bytes("full", &[7u8; 64]);
        read_session_key(file.path(), false).expect("key derived");
    }

    #[test]
    fn missing_key_file_falls_back_when_ephemeral_is_allowed() {
        let path = env::temp_dir().join(format!("pantry-key-absent-{}", uuid::Uuid::new_v4()));
        read_session_key(path.to_str().expect("utf-8 temp path"), true)
            .expect("ephemeral fallback");
    }
}
