//! Domain models.

pub mod auth;
pub mod user;

pub use auth::{AuthResult, AuthTokens, GoogleProfile, TokenClaims};
pub use user::{NewUser, RefreshTokenRecord, User, UserChanges};
