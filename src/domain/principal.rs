//! Session principal: the minimal aggregate projection held in the cookie.

use serde::{Deserialize, Serialize};

use crate::domain::user::{User, UserId, Username};

/// Identity and handle of the signed-in user. Established at sign-in and
/// read-only thereafter; never carries the credential secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    id: UserId,
    username: Username,
}

impl Principal {
    pub fn new(id: UserId, username: Username) -> Self {
        Self { id, username }
    }

    /// Project the signed-in aggregate down to its session form.
    pub fn for_user(user: &User) -> Self {
        Self::new(*user.id(), user.username().clone())
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn username(&self) -> &Username {
        &self.username
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::PasswordHash;

    #[test]
    fn projection_carries_id_and_handle_only() {
        let user = User::new(
            UserId::random(),
            Username::new("ada").expect("valid username"),
            PasswordHash::digest_of("pw"),
        );
        let principal = Principal::for_user(&user);

        assert_eq!(principal.id(), user.id());
        assert_eq!(principal.username(), user.username());
        let encoded = serde_json::to_string(&principal).expect("serialisable");
        assert!(!encoded.contains("password"));
    }
}
