//! Cognito user migration trigger.
//!
//! Called when a user who is not yet in the user pool signs in
//! (`UserMigration_Authentication`) or asks for a password reset
//! (`UserMigration_ForgotPassword`). The legacy provider decides whether the
//! user is admitted; on success Cognito creates the user with the attributes
//! set here, and later sign-ins no longer reach this trigger.

use aws_secrets::SecretStore;
use tracing::{error, info, info_span, warn, Instrument, Span};

use crate::config::Config;
use crate::error::{HookError, Result};
use crate::legacy_auth::LegacyAuthClient;
use crate::models::{MessageAction, MigrationEvent, TriggerSource, UserStatus};

pub struct MigrationHandler<S> {
    secrets: S,
    config: Config,
    span: Span,
}

impl<S: SecretStore> MigrationHandler<S> {
    pub fn new(secrets: S, config: Config) -> Self {
        Self {
            secrets,
            config,
            span: info_span!("user_migration_trigger"),
        }
    }

    /// Handle one trigger invocation. Errors are logged here before being
    /// returned, so callers only need to hand them back to Cognito.
    pub async fn handle(&self, event: MigrationEvent) -> Result<MigrationEvent> {
        let result = self.process(event).instrument(self.span.clone()).await;

        if let Err(e) = &result {
            let _guard = self.span.enter();
            if e.is_rejection() {
                warn!(error = %e, "User migration rejected");
            } else {
                error!(error = ?e, "User migration failed");
            }
        }

        result
    }

    async fn process(&self, mut event: MigrationEvent) -> Result<MigrationEvent> {
        info!(
            event = %serde_json::to_string(&event.redacted()).unwrap_or_default(),
            "Received user migration event"
        );

        let username = event.user_name.clone();

        match &event.trigger_source {
            TriggerSource::Authentication => {
                let Some(password) = event.request.password.as_deref() else {
                    warn!("Authentication event for '{}' has no password", username);
                    return Err(HookError::InvalidCredentials);
                };

                let client = self.legacy_client().await?;
                if !client.check_credentials(&username, password).await? {
                    info!("User '{}' failed to authenticate with legacy provider", username);
                    return Err(HookError::InvalidCredentials);
                }
                info!("User '{}' was successfully authenticated with legacy provider", username);

                event.response.final_user_status = Some(UserStatus::Confirmed);
                event.response.message_action = Some(MessageAction::Suppress);
                event.response.set_user_attribute("email", username);
            }
            TriggerSource::ForgotPassword => {
                let client = self.legacy_client().await?;
                if !client.check_username_exists(&username).await? {
                    info!("User '{}' does not exist in legacy provider", username);
                    return Err(HookError::UnknownUser(username));
                }
                info!("User '{}' exists in legacy provider", username);

                // Cognito only sends the reset code to a verified email
                event.response.set_user_attribute("email", username);
                event.response.set_user_attribute("email_verified", true);
                event.response.message_action = Some(MessageAction::Suppress);
            }
            TriggerSource::Other(source) => {
                return Err(HookError::UnsupportedTrigger(source.clone()));
            }
        }

        info!(
            response = %serde_json::to_string(&event.response).unwrap_or_default(),
            "User migration response"
        );
        Ok(event)
    }

    /// Load credentials for this invocation and build a client from them
    async fn legacy_client(&self) -> Result<LegacyAuthClient> {
        let credentials = self
            .secrets
            .get_legacy_credentials(&self.config.auth_api_credentials_secret_id)
            .await?;

        let client = LegacyAuthClient::new(credentials);
        Ok(match &self.config.legacy_auth_base_url {
            Some(base_url) => client.with_base_url(base_url.as_str()),
            None => client,
        })
    }
}
