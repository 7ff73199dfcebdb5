//! Cognito triggers that migrate users from the legacy identity provider.
//!
//! - [`handlers::PreSignUpHandler`] auto-confirms new sign-ups.
//! - [`handlers::MigrationHandler`] admits users who are not yet in the user
//!   pool by checking them against the legacy provider, either with their
//!   password (sign-in) or by email lookup (password reset).

pub mod config;
pub mod error;
pub mod handlers;
pub mod legacy_auth;
pub mod logging;
pub mod models;

pub use config::Config;
pub use error::{HookError, Result};
pub use handlers::{MigrationHandler, PreSignUpHandler};
