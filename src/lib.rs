//! # blogsite
//!
//! Two halves of a small blog site:
//!
//! - `client`: the user profile page workflow (sign out, delete account,
//!   update profile) against the auth/user HTTP services, with an injectable
//!   global auth store.
//! - `routes` + `services`: the blog HTTP endpoints and the controller they
//!   delegate to.

pub mod client;
pub mod config;
pub mod routes;
pub mod services;
pub mod state;
