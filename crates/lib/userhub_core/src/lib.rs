//! # userhub_core
//!
//! Core domain logic for Userhub: users, credentials, and the
//! access/refresh token session lifecycle.

pub mod auth;
pub mod db;
pub mod migrate;
pub mod models;
pub mod repo;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
