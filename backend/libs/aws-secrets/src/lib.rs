//! AWS Secrets Manager integration library
//!
//! This library provides a small interface to AWS Secrets Manager for the
//! Cognito trigger functions:
//! - A [`SecretStore`] seam so handlers can be exercised without AWS
//! - Classified errors for missing, forbidden and undecryptable secrets
//! - Typed parsing of the legacy identity provider credentials secret
//!
//! Secrets are fetched on every call. Trigger invocations must observe
//! rotated credentials immediately, so nothing is cached in-process.
//!
//! # Example
//!
//! ```no_run
//! use aws_secrets::{SecretManager, SecretStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create manager (uses AWS credentials from the Lambda execution role)
//!     let manager = SecretManager::new().await;
//!
//!     // Fetch the legacy provider credentials
//!     let credentials = manager
//!         .get_legacy_credentials("prod/auth0/migration-client")
//!         .await?;
//!     println!("legacy domain: {}", credentials.domain);
//!
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_secretsmanager::Client as SecretsClient;
use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum SecretError {
    #[error("Secret not found: {0}")]
    NotFound(String),

    #[error("Access denied to secret: {0}")]
    AccessDenied(String),

    #[error("Secret decryption failed: {0}")]
    DecryptionFailed(String),

    #[error("Invalid secret format: {0}")]
    InvalidFormat(String),

    #[error("AWS SDK error: {0}")]
    AwsSdk(String),
}

/// Credentials of the legacy identity provider application
///
/// Expects the secret to be stored as JSON with the following structure:
/// ```json
/// {
///   "domain": "tenant.eu.auth0.com",
///   "client_id": "abc123",
///   "client_secret": "shh"
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct LegacyAuthCredentials {
    /// Tenant domain, without scheme (e.g. "tenant.eu.auth0.com")
    pub domain: String,
    pub client_id: String,
    pub client_secret: SecretString,
}

impl LegacyAuthCredentials {
    /// Parse legacy credentials from JSON string
    pub fn from_json(json: &str) -> Result<Self, SecretError> {
        let credentials: Self = serde_json::from_str(json).map_err(|e| {
            SecretError::InvalidFormat(format!("Failed to parse legacy credentials: {}", e))
        })?;

        if credentials.domain.trim().is_empty() {
            return Err(SecretError::InvalidFormat(
                "Legacy credentials domain is empty".to_string(),
            ));
        }

        Ok(credentials)
    }
}

/// Source of secret strings, keyed by secret id
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Fetch the string value of a secret
    async fn get_secret(&self, secret_id: &str) -> Result<String, SecretError>;

    /// Fetch and parse the legacy provider credentials secret
    async fn get_legacy_credentials(
        &self,
        secret_id: &str,
    ) -> Result<LegacyAuthCredentials, SecretError> {
        let secret_json = self.get_secret(secret_id).await?;
        LegacyAuthCredentials::from_json(&secret_json)
    }
}

/// AWS Secrets Manager client
pub struct SecretManager {
    client: SecretsClient,
}

impl SecretManager {
    /// Create a new SecretManager with default AWS configuration
    ///
    /// Uses AWS credentials from:
    /// 1. Environment variables (AWS_ACCESS_KEY_ID, AWS_SECRET_ACCESS_KEY)
    /// 2. AWS credentials file (~/.aws/credentials)
    /// 3. The Lambda execution role
    pub async fn new() -> Self {
        let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
        Self::from_client(SecretsClient::new(&config))
    }

    /// Wrap an already configured SDK client
    pub fn from_client(client: SecretsClient) -> Self {
        info!("Initialized AWS Secrets Manager client");
        Self { client }
    }

    /// Fetch secret from AWS Secrets Manager
    async fn fetch_secret(&self, secret_id: &str) -> Result<String, SecretError> {
        let response = self
            .client
            .get_secret_value()
            .secret_id(secret_id)
            .send()
            .await
            .map_err(|e| classify_sdk_error(secret_id, &format!("{:?}", e)))?;

        let secret_string = response
            .secret_string()
            .ok_or_else(|| SecretError::InvalidFormat("Secret is binary, not string".to_string()))?
            .to_string();

        info!(
            secret_id = %secret_id,
            version_id = ?response.version_id(),
            "Secret fetched from AWS Secrets Manager"
        );

        Ok(secret_string)
    }
}

#[async_trait]
impl SecretStore for SecretManager {
    async fn get_secret(&self, secret_id: &str) -> Result<String, SecretError> {
        debug!(secret_id = %secret_id, "Fetching secret from AWS Secrets Manager");
        self.fetch_secret(secret_id).await
    }
}

/// Map an SDK error message onto a [`SecretError`] variant
fn classify_sdk_error(secret_id: &str, error_msg: &str) -> SecretError {
    if error_msg.contains("ResourceNotFoundException") {
        SecretError::NotFound(secret_id.to_string())
    } else if error_msg.contains("AccessDeniedException") {
        SecretError::AccessDenied(secret_id.to_string())
    } else if error_msg.contains("DecryptionFailure") {
        SecretError::DecryptionFailed(secret_id.to_string())
    } else {
        SecretError::AwsSdk(error_msg.to_string())
    }
}
