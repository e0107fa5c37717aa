//! Session-authenticated pantry service.
//!
//! A small web application where each signed-in user manages an ordered
//! collection of food items embedded in their own user document. The crate
//! is laid out hexagonally: `domain` holds the aggregate and its ports,
//! `outbound` the persistence adapters, `inbound` the HTTP surface, and
//! `middleware` the request-level concerns (sign-in gating, view context,
//! method override, request logging).

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;
