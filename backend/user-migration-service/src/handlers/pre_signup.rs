//! Cognito pre sign-up trigger.
//!
//! Every new user is confirmed immediately. Email ownership is checked by the
//! application, so Cognito is told not to verify email or phone itself.

use tracing::{info, info_span, Span};

use crate::models::{PreSignUpEvent, PreSignUpResponse};

pub struct PreSignUpHandler {
    span: Span,
}

impl Default for PreSignUpHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl PreSignUpHandler {
    pub fn new() -> Self {
        Self {
            span: info_span!("pre_signup_trigger"),
        }
    }

    pub fn handle(&self, mut event: PreSignUpEvent) -> PreSignUpEvent {
        let _guard = self.span.enter();
        info!(
            event = %serde_json::to_string(&event).unwrap_or_default(),
            "Received pre sign-up event"
        );

        event.response = PreSignUpResponse {
            auto_confirm_user: true,
            auto_verify_email: false,
            auto_verify_phone: false,
        };

        info!(response = ?event.response, "Pre sign-up response");
        event
    }
}
