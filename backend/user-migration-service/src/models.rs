//! Cognito trigger event payloads.
//!
//! Only the fields the hooks read or write are typed. Everything else Cognito
//! sends (`version`, `region`, `userPoolId`, `callerContext`, ...) is kept in
//! the flattened `extra` maps so the event can be returned unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Replaces the password whenever an event is logged
pub const PASSWORD_MASK: &str = "********";

const AUTHENTICATION: &str = "UserMigration_Authentication";
const FORGOT_PASSWORD: &str = "UserMigration_ForgotPassword";

/// `triggerSource` of a user migration event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TriggerSource {
    Authentication,
    ForgotPassword,
    /// Anything else Cognito might send, kept verbatim
    Other(String),
}

impl From<String> for TriggerSource {
    fn from(value: String) -> Self {
        match value.as_str() {
            AUTHENTICATION => TriggerSource::Authentication,
            FORGOT_PASSWORD => TriggerSource::ForgotPassword,
            _ => TriggerSource::Other(value),
        }
    }
}

impl From<TriggerSource> for String {
    fn from(value: TriggerSource) -> Self {
        match value {
            TriggerSource::Authentication => AUTHENTICATION.to_string(),
            TriggerSource::ForgotPassword => FORGOT_PASSWORD.to_string(),
            TriggerSource::Other(other) => other,
        }
    }
}

impl fmt::Display for TriggerSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriggerSource::Authentication => f.write_str(AUTHENTICATION),
            TriggerSource::ForgotPassword => f.write_str(FORGOT_PASSWORD),
            TriggerSource::Other(other) => f.write_str(other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserStatus {
    Confirmed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageAction {
    /// Cognito does not send its own welcome message
    Suppress,
}

/// User migration trigger event
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationEvent {
    pub trigger_source: TriggerSource,
    pub user_name: String,
    #[serde(default)]
    pub request: MigrationRequest,
    #[serde(default)]
    pub response: MigrationResponse,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MigrationEvent {
    /// Copy of the event that is safe to log
    pub fn redacted(&self) -> Self {
        let mut event = self.clone();
        if event.request.password.is_some() {
            event.request.password = Some(PASSWORD_MASK.to_string());
        }
        event
    }
}

#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl fmt::Debug for MigrationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MigrationRequest")
            .field("password", &self.password.as_ref().map(|_| PASSWORD_MASK))
            .field("extra", &self.extra)
            .finish()
    }
}

/// What the migration trigger tells Cognito about the user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_user_status: Option<UserStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_action: Option<MessageAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_attributes: Option<BTreeMap<String, Value>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MigrationResponse {
    /// Add (or overwrite) a user attribute, keeping the ones already present
    pub fn set_user_attribute(&mut self, name: &str, value: impl Into<Value>) {
        self.user_attributes
            .get_or_insert_with(BTreeMap::new)
            .insert(name.to_string(), value.into());
    }
}

/// Pre sign-up trigger event
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreSignUpEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger_source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    /// Always overwritten by the hook, so whatever Cognito sent is ignored
    #[serde(skip_deserializing, default)]
    pub response: PreSignUpResponse,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreSignUpResponse {
    #[serde(default)]
    pub auto_confirm_user: bool,
    #[serde(default)]
    pub auto_verify_email: bool,
    #[serde(default)]
    pub auto_verify_phone: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn authentication_event() -> Value {
        json!({
            "version": "1",
            "triggerSource": "UserMigration_Authentication",
            "region": "eu-west-1",
            "userPoolId": "eu-west-1_abc",
            "userName": "a@x.com",
            "callerContext": {"awsSdkVersion": "aws-sdk-unknown-unknown", "clientId": "xyz"},
            "request": {"password": "p", "validationData": null},
            "response": {}
        })
    }

    #[test]
    fn test_trigger_source_parsing() {
        let event: MigrationEvent = serde_json::from_value(authentication_event()).unwrap();
        assert_eq!(event.trigger_source, TriggerSource::Authentication);
        assert_eq!(event.user_name, "a@x.com");
        assert_eq!(event.request.password.as_deref(), Some("p"));

        let other: TriggerSource = serde_json::from_value(json!("PreSignUp_SignUp")).unwrap();
        assert_eq!(other, TriggerSource::Other("PreSignUp_SignUp".to_string()));
        assert_eq!(other.to_string(), "PreSignUp_SignUp");
    }

    #[test]
    fn test_unknown_fields_survive() {
        let event: MigrationEvent = serde_json::from_value(authentication_event()).unwrap();
        let output = serde_json::to_value(&event).unwrap();

        assert_eq!(output["userPoolId"], "eu-west-1_abc");
        assert_eq!(output["callerContext"]["clientId"], "xyz");
        assert!(output["request"].get("validationData").is_some());
        assert_eq!(output["response"], json!({}));
    }

    #[test]
    fn test_redacted_masks_password() {
        let event: MigrationEvent = serde_json::from_value(authentication_event()).unwrap();
        let redacted = event.redacted();

        assert_eq!(redacted.request.password.as_deref(), Some(PASSWORD_MASK));
        assert_eq!(event.request.password.as_deref(), Some("p"));
        assert!(!serde_json::to_string(&redacted).unwrap().contains("\"p\""));
    }

    #[test]
    fn test_debug_never_prints_password() {
        let event: MigrationEvent = serde_json::from_value(authentication_event()).unwrap();
        let debug = format!("{:?}", event.request);
        assert!(debug.contains(PASSWORD_MASK));
        assert!(!debug.contains("\"p\""));
    }

    #[test]
    fn test_forgot_password_without_request() {
        let event: MigrationEvent = serde_json::from_value(json!({
            "triggerSource": "UserMigration_ForgotPassword",
            "userName": "a@x.com"
        }))
        .unwrap();

        assert_eq!(event.trigger_source, TriggerSource::ForgotPassword);
        assert!(event.request.password.is_none());
        assert_eq!(event.redacted().request.password, None);
    }

    #[test]
    fn test_response_serialization_omits_unset() {
        let mut response = MigrationResponse::default();
        response.final_user_status = Some(UserStatus::Confirmed);
        response.message_action = Some(MessageAction::Suppress);
        response.set_user_attribute("email", "a@x.com");

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "finalUserStatus": "CONFIRMED",
                "messageAction": "SUPPRESS",
                "userAttributes": {"email": "a@x.com"}
            })
        );
    }

    #[test]
    fn test_set_user_attribute_keeps_existing() {
        let mut response: MigrationResponse = serde_json::from_value(json!({
            "userAttributes": {"custom:tenant": "acme"}
        }))
        .unwrap();
        response.set_user_attribute("email", "a@x.com");

        let attributes = response.user_attributes.unwrap();
        assert_eq!(attributes["custom:tenant"], "acme");
        assert_eq!(attributes["email"], "a@x.com");
    }
}
