//! Domain types and ports.
//!
//! Purpose: strongly typed entities for the pantry service, kept free of
//! transport concerns. Each type documents its invariants in Rustdoc.
//!
//! Public surface:
//! - [`User`], [`UserId`], [`Username`] — the owning aggregate and identity.
//! - [`Pantry`], [`FoodItem`], [`FoodId`], [`FoodDraft`] — the embedded
//!   collection and its per-item identity.
//! - [`Principal`] — the session projection of an aggregate.
//! - [`ports`] — the repository port adapters implement.

pub mod pantry;
pub mod ports;
pub mod principal;
pub mod user;

pub use self::pantry::{FoodDraft, FoodId, FoodItem, Pantry};
pub use self::principal::Principal;
pub use self::user::{NewUser, PasswordHash, User, UserId, UserValidationError, Username};
