use aws_secrets::LegacyAuthCredentials;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, error, info, instrument, warn};

use super::models::{LegacyUser, TokenResponse};
use super::LegacyAuthError;

/// Connection name of password-based (database) users on the legacy provider
pub const USERNAME_PASSWORD_CONNECTION: &str = "Username-Password-Authentication";

const TOKEN_PATH: &str = "/oauth/token";
const USERS_BY_EMAIL_PATH: &str = "/api/v2/users-by-email";

/// HTTP methods used against the legacy provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// Optional parts of a legacy provider request
#[derive(Default)]
struct RequestParts<'a> {
    bearer_token: Option<&'a str>,
    form: Option<&'a [(&'a str, &'a str)]>,
    query: Option<&'a [(&'a str, &'a str)]>,
}

/// Legacy identity provider client
///
/// Built per invocation from freshly loaded credentials. Holds no tokens.
pub struct LegacyAuthClient {
    /// HTTP client for making API requests
    client: Client,
    /// Scheme and host the requests go to (e.g., "https://tenant.auth0.com")
    base_url: String,
    /// Tenant domain, used for the management API audience
    domain: String,
    client_id: String,
    client_secret: SecretString,
}

impl LegacyAuthClient {
    pub fn new(credentials: LegacyAuthCredentials) -> Self {
        Self {
            client: Client::new(),
            base_url: format!("https://{}", credentials.domain),
            domain: credentials.domain,
            client_id: credentials.client_id,
            client_secret: credentials.client_secret,
        }
    }

    /// Send requests somewhere other than `https://{domain}`
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Use a preconfigured HTTP client (proxies, timeouts)
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Audience of the management API, always derived from the tenant domain
    pub fn management_audience(&self) -> String {
        format!("https://{}/api/v2/", self.domain)
    }

    /// Send a request and return the status with the raw body.
    ///
    /// Any status is returned as-is; only transport faults are errors.
    async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        parts: RequestParts<'_>,
    ) -> Result<(StatusCode, String), LegacyAuthError> {
        let url = format!("{}{}", self.base_url, path);

        let mut builder = match method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
        };
        if let Some(token) = parts.bearer_token {
            builder = builder.bearer_auth(token);
        }
        if let Some(form) = parts.form {
            builder = builder.form(form);
        }
        if let Some(query) = parts.query {
            builder = builder.query(query);
        }

        debug!(?method, %url, "Sending legacy provider request");

        let response = builder.send().await.map_err(|e| {
            error!("Request error: {:?} {}: {}", method, url, e);
            LegacyAuthError::Transport(e)
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!("Failed to read response body from {}: {}", url, e);
            LegacyAuthError::Transport(e)
        })?;

        Ok((status, body))
    }

    /// Check a username and password with the password grant.
    ///
    /// `Ok(false)` means the provider rejected the credentials (401/403).
    /// Any other outcome besides 200 is an error.
    #[instrument(skip(self, password))]
    pub async fn check_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<bool, LegacyAuthError> {
        let form = [
            ("grant_type", "password"),
            ("username", username),
            ("password", password),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.expose_secret()),
        ];

        let (status, body) = self
            .request(
                HttpMethod::Post,
                TOKEN_PATH,
                RequestParts {
                    form: Some(&form),
                    ..Default::default()
                },
            )
            .await
            .map_err(|e| LegacyAuthError::CredentialCheckFailed(e.to_string()))?;

        match status {
            StatusCode::OK => Ok(true),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                info!(status = %status, "Legacy provider rejected credentials");
                Ok(false)
            }
            _ => {
                error!(
                    "Check credentials request error: status={}, body={}",
                    status, body
                );
                Err(LegacyAuthError::CredentialCheckFailed(format!(
                    "unexpected status {}",
                    status
                )))
            }
        }
    }

    /// Fetch a management API token with the client-credentials grant.
    ///
    /// The management API is the only way to look users up, so there is no
    /// fallback when this fails.
    pub async fn get_management_token(&self) -> Result<String, LegacyAuthError> {
        let audience = self.management_audience();
        let form = [
            ("grant_type", "client_credentials"),
            ("audience", audience.as_str()),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.expose_secret()),
        ];

        let (status, body) = self
            .request(
                HttpMethod::Post,
                TOKEN_PATH,
                RequestParts {
                    form: Some(&form),
                    ..Default::default()
                },
            )
            .await
            .map_err(|e| LegacyAuthError::ManagementTokenUnavailable(e.to_string()))?;

        if !status.is_success() {
            error!(
                "Management token request error: status={}, body={}",
                status, body
            );
            return Err(LegacyAuthError::ManagementTokenUnavailable(format!(
                "unexpected status {}",
                status
            )));
        }

        let token: TokenResponse = serde_json::from_str(&body).map_err(|e| {
            error!("Failed to parse management token response: {}", e);
            LegacyAuthError::ManagementTokenUnavailable(format!("invalid token response: {}", e))
        })?;

        debug!(expires_in = ?token.expires_in, "Fetched management API token");
        Ok(token.access_token)
    }

    /// Check whether a password-based legacy user exists for this email.
    ///
    /// Users who only sign in through federated connections are reported as
    /// absent; they cannot be migrated into password accounts.
    #[instrument(skip(self))]
    pub async fn check_username_exists(&self, username: &str) -> Result<bool, LegacyAuthError> {
        let token = self.get_management_token().await?;

        let query = [("email", username)];
        let (status, body) = self
            .request(
                HttpMethod::Get,
                USERS_BY_EMAIL_PATH,
                RequestParts {
                    bearer_token: Some(&token),
                    query: Some(&query),
                    ..Default::default()
                },
            )
            .await
            .map_err(|e| LegacyAuthError::UsernameCheckFailed(e.to_string()))?;

        if !status.is_success() {
            error!(
                "Username check request error: status={}, body={}",
                status, body
            );
            return Err(LegacyAuthError::UsernameCheckFailed(format!(
                "unexpected status {}",
                status
            )));
        }

        let users: Vec<LegacyUser> = serde_json::from_str(&body).map_err(|e| {
            error!("Failed to parse users-by-email response: {}", e);
            LegacyAuthError::UsernameCheckFailed(format!("invalid users response: {}", e))
        })?;

        let Some(user) = users.first() else {
            info!("No user found for username '{}'", username);
            return Ok(false);
        };

        if !user.has_connection(USERNAME_PASSWORD_CONNECTION) {
            warn!(
                user_id = ?user.user_id,
                social = user.is_social(),
                "User '{}' was found but does not use {}",
                username, USERNAME_PASSWORD_CONNECTION
            );
            return Ok(false);
        }

        Ok(true)
    }
}
