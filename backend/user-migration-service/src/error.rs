use aws_secrets::SecretError;
use thiserror::Error;

use crate::legacy_auth::LegacyAuthError;

pub type Result<T> = std::result::Result<T, HookError>;

/// Errors that reject a trigger invocation.
///
/// Cognito treats every error returned by a trigger the same way: the sign-in
/// or password reset is denied. The variants only differ in what gets logged.
#[derive(Debug, Error)]
pub enum HookError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Secret store error: {0}")]
    Secret(#[from] SecretError),

    #[error(transparent)]
    LegacyAuth(#[from] LegacyAuthError),

    #[error("username and/or password are invalid")]
    InvalidCredentials,

    #[error("no user found for username '{0}'")]
    UnknownUser(String),

    #[error("Unhandled trigger source '{0}'")]
    UnsupportedTrigger(String),
}

impl HookError {
    /// Business rejections, as opposed to failures to perform the check
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            HookError::InvalidCredentials
                | HookError::UnknownUser(_)
                | HookError::UnsupportedTrigger(_)
        )
    }
}
