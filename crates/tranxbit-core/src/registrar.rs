//! Boundary with the external authentication service.
//!
//! Once the guard accepts a draft, the identity fields and password are
//! handed to a [`Registrar`]. The service either asks the user to verify
//! their email or refuses with a human-readable reason that is shown as-is.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::draft::RegistrationDraft;

/// Payload sent to the authentication service.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl From<&RegistrationDraft> for RegistrationRequest {
    fn from(draft: &RegistrationDraft) -> Self {
        Self {
            first_name: draft.first_name.clone(),
            last_name: draft.last_name.clone(),
            email: draft.email.clone(),
            password: draft.password.clone(),
        }
    }
}

impl fmt::Debug for RegistrationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationRequest")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// What the user does next after a successful registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "next", rename_all = "kebab-case")]
pub enum RegistrationOutcome {
    /// Account created; a verification email went to `email`.
    VerifyEmail { email: String },
}

/// Refusal or failure reported by the authentication service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrarError {
    pub message: String,
}

impl RegistrarError {
    /// Generic text used when the service gives no reason.
    pub const FALLBACK_MESSAGE: &'static str = "Please check your information and try again";

    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            Self::fallback()
        } else {
            Self { message }
        }
    }

    #[must_use]
    pub fn fallback() -> Self {
        Self {
            message: Self::FALLBACK_MESSAGE.to_owned(),
        }
    }
}

impl fmt::Display for RegistrarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for RegistrarError {}

/// Account creation backend.
#[async_trait]
pub trait Registrar: Send + Sync {
    /// Create an account for an already-guarded request.
    async fn register(
        &self,
        request: RegistrationRequest,
    ) -> Result<RegistrationOutcome, RegistrarError>;
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn blank_service_message_falls_back() {
        assert_eq!(RegistrarError::new("  ").message, RegistrarError::FALLBACK_MESSAGE);
        assert_eq!(RegistrarError::new("email taken").to_string(), "email taken");
    }

    #[test]
    fn request_debug_omits_password() {
        let request = RegistrationRequest {
            first_name: "Jo".into(),
            last_name: "Do".into(),
            email: "jo@do.com".into(),
            password: "Passw0rd!".into(),
        };
        assert!(!format!("{request:?}").contains("Passw0rd"));
    }

    #[test]
    fn outcome_serializes_next_step() {
        let outcome = RegistrationOutcome::VerifyEmail {
            email: "jo@do.com".into(),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["next"], "verify-email");
        assert_eq!(json["email"], "jo@do.com");
    }
}
