//! User aggregate and its identity newtypes.
//!
//! The user is the unit of persistence: it owns the embedded [`Pantry`]
//! collection, and no pantry item exists outside a saved user document.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::domain::pantry::Pantry;

/// Validation errors raised by the user constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyUsername,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable aggregate identifier, assigned by the repository at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a fresh random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Display handle chosen at sign-up.
///
/// ## Invariants
/// - Non-empty once trimmed of whitespace. Uniqueness is not enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`], trimming surrounding whitespace.
    pub fn new(username: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = username.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Opaque credential secret. Never serialised and never rendered.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Hash a raw password for storage.
    pub fn digest_of(password: &str) -> Self {
        let digest = Sha256::digest(password.as_bytes());
        Self(hex::encode(digest))
    }

    /// Check a raw password against the stored hash.
    pub fn matches(&self, password: &str) -> bool {
        Self::digest_of(password).0 == self.0
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Keep the secret out of logs.
        f.write_str("PasswordHash(..)")
    }
}

/// Registration payload handed to the repository, which assigns the identity.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: Username,
    pub password_hash: PasswordHash,
}

/// The owning aggregate: identity, handle, credential secret, and the
/// embedded pantry collection.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    id: UserId,
    username: Username,
    password_hash: PasswordHash,
    pantry: Pantry,
}

impl User {
    /// Assemble an aggregate from validated components with an empty pantry.
    pub fn new(id: UserId, username: Username, password_hash: PasswordHash) -> Self {
        Self {
            id,
            username,
            password_hash,
            pantry: Pantry::new(),
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    /// The embedded item collection in stored order.
    pub fn pantry(&self) -> &Pantry {
        &self.pantry
    }

    /// Mutable access for the load → mutate → save cycle.
    pub fn pantry_mut(&mut self) -> &mut Pantry {
        &mut self.pantry
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn username_rejects_blank_input(#[case] raw: &str) {
        assert_eq!(Username::new(raw), Err(UserValidationError::EmptyUsername));
    }

    #[test]
    fn username_trims_surrounding_whitespace() {
        let name = Username::new("  ada ").expect("valid username");
        assert_eq!(name.as_ref(), "ada");
    }

    #[test]
    fn password_hash_matches_original_secret_only() {
        let hash = PasswordHash::digest_of("correct horse");
        assert!(hash.matches("correct horse"));
        assert!(!hash.matches("battery staple"));
    }

    #[test]
    fn password_hash_debug_output_hides_the_secret() {
        let hash = PasswordHash::digest_of("hunter2");
        assert_eq!(format!("{hash:?}"), "PasswordHash(..)");
    }

    #[test]
    fn user_id_round_trips_through_display_and_parse() {
        let id = UserId::random();
        let parsed: UserId = id.to_string().parse().expect("valid id text");
        assert_eq!(parsed, id);
    }
}
