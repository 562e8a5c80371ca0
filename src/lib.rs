//! Casting agency resource server.
//!
//! Actors/movies routes gated by `requires_auth(permission)`, which verifies
//! bearer JWTs against the identity provider's JWKS document.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod repos;
pub mod services;
pub mod state;
