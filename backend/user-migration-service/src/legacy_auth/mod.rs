//! Client for the legacy identity provider (Auth0-compatible).
//!
//! Two credential scopes are involved: the password grant on `/oauth/token`
//! for end-user logins, and a client-credentials management token for the
//! privileged `/api/v2/users-by-email` lookup.

mod client;
mod models;

pub use client::{HttpMethod, LegacyAuthClient, USERNAME_PASSWORD_CONNECTION};
pub use models::{LegacyIdentity, LegacyUser, TokenResponse};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LegacyAuthError {
    #[error("Legacy provider transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to check login for user: {0}")]
    CredentialCheckFailed(String),

    #[error("Could not retrieve management API token: {0}")]
    ManagementTokenUnavailable(String),

    #[error("Failed to check for existence of user: {0}")]
    UsernameCheckFailed(String),
}
