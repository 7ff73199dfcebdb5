use serde::Deserialize;

use crate::error::{HookError, Result};

/// Migration trigger configuration, read once per Lambda container.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Secrets Manager id of the legacy provider credentials
    pub auth_api_credentials_secret_id: String,

    /// Overrides `https://{domain}` when talking to the legacy provider
    #[serde(default)]
    pub legacy_auth_base_url: Option<String>,
}

impl Config {
    pub fn from_env() -> std::result::Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>()
    }

    pub fn validate(&self) -> Result<()> {
        if self.auth_api_credentials_secret_id.trim().is_empty() {
            return Err(HookError::Config(
                "AUTH_API_CREDENTIALS_SECRET_ID must not be empty".to_string(),
            ));
        }

        if let Some(url) = &self.legacy_auth_base_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(HookError::Config(format!(
                    "LEGACY_AUTH_BASE_URL must be an http(s) URL, got '{}'",
                    url
                )));
            }
        }

        Ok(())
    }
}
