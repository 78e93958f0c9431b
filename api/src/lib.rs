//! # WithDogAndCat API
//!
//! actix-web surface over the authentication services: login, refresh token
//! reissue, logout and the JWT middleware guarding protected routes.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;

pub use app::{app_state, create_app, HttpSettings};
