//! Shared fixtures: a mock legacy provider and an in-memory secret store.

#![allow(dead_code)]

use async_trait::async_trait;
use aws_secrets::{LegacyAuthCredentials, SecretError, SecretStore};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const SECRET_ID: &str = "test/legacy-auth";
pub const DOMAIN: &str = "tenant.auth0.test";
pub const CLIENT_ID: &str = "test-client";
pub const CLIENT_SECRET: &str = "test-client-secret";
pub const MANAGEMENT_TOKEN: &str = "mgmt-token-123";

pub fn credentials_json() -> String {
    json!({
        "domain": DOMAIN,
        "client_id": CLIENT_ID,
        "client_secret": CLIENT_SECRET,
    })
    .to_string()
}

pub fn credentials() -> LegacyAuthCredentials {
    LegacyAuthCredentials::from_json(&credentials_json()).unwrap()
}

/// Secret store serving one secret and counting lookups
#[derive(Default)]
pub struct StaticSecretStore {
    value: Option<String>,
    calls: Arc<AtomicUsize>,
}

impl StaticSecretStore {
    pub fn with_credentials() -> Self {
        Self {
            value: Some(credentials_json()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Shared counter of lookups, readable after the store is moved away
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl SecretStore for StaticSecretStore {
    async fn get_secret(&self, secret_id: &str) -> Result<String, SecretError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match (&self.value, secret_id) {
            (Some(value), SECRET_ID) => Ok(value.clone()),
            _ => Err(SecretError::NotFound(secret_id.to_string())),
        }
    }
}

/// Password grant answered with `status`
pub async fn setup_password_grant(server: &MockServer, status: u16) {
    let template = if status == 200 {
        ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "user-token",
            "token_type": "Bearer",
            "expires_in": 86400
        }))
    } else {
        ResponseTemplate::new(status).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "Wrong email or password."
        }))
    };

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(body_string_contains("grant_type=password"))
        .and(body_string_contains(format!("client_id={}", CLIENT_ID)))
        .respond_with(template)
        .mount(server)
        .await;
}

/// Client-credentials grant returning [`MANAGEMENT_TOKEN`]
pub async fn setup_management_token(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(body_string_contains("grant_type=client_credentials"))
        .and(body_string_contains("audience=https%3A%2F%2Ftenant.auth0.test%2Fapi%2Fv2%2F"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": MANAGEMENT_TOKEN,
            "token_type": "Bearer",
            "expires_in": 86400
        })))
        .mount(server)
        .await;
}

/// `users-by-email` lookup for `email`, requiring the management token
pub async fn setup_users_by_email(server: &MockServer, email: &str, users: Value) {
    Mock::given(method("GET"))
        .and(path("/api/v2/users-by-email"))
        .and(query_param("email", email))
        .and(header("authorization", format!("Bearer {}", MANAGEMENT_TOKEN).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(users))
        .mount(server)
        .await;
}

pub fn database_user(email: &str) -> Value {
    json!([{
        "user_id": "auth0|abc123",
        "email": email,
        "identities": [
            {"connection": "Username-Password-Authentication", "provider": "auth0", "isSocial": false}
        ]
    }])
}

pub fn federated_user(email: &str) -> Value {
    json!([{
        "user_id": "samlp|corp|abc123",
        "email": email,
        "identities": [
            {"connection": "corp-saml", "provider": "samlp", "isSocial": false},
            {"connection": "google-oauth2", "provider": "google-oauth2", "isSocial": true}
        ]
    }])
}
