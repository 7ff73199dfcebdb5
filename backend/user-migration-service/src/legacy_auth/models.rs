use serde::Deserialize;

/// Response from `POST /oauth/token`
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

/// User record returned by `GET /api/v2/users-by-email`
#[derive(Debug, Clone, Deserialize)]
pub struct LegacyUser {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub identities: Vec<LegacyIdentity>,
}

/// One way a legacy user can sign in (database connection, Google, SAML, ...)
#[derive(Debug, Clone, Deserialize)]
pub struct LegacyIdentity {
    pub connection: String,
    #[serde(default, rename = "isSocial")]
    pub is_social: Option<bool>,
}

impl LegacyUser {
    pub fn has_connection(&self, connection: &str) -> bool {
        self.identities.iter().any(|i| i.connection == connection)
    }

    /// Signs in through a social provider (Google, GitHub, ...)
    pub fn is_social(&self) -> bool {
        self.identities.iter().any(|i| i.is_social == Some(true))
    }
}
