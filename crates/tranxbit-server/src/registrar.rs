//! Registrar implementations.
//!
//! - [`LocalRegistrar`]: in-memory, used when no authentication service is
//!   configured. Remembers emails for the lifetime of the process.
//! - [`HttpRegistrar`]: forwards to the external authentication service's
//!   `POST /register` endpoint (feature `auth-service`).

use std::collections::HashSet;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::info;

use tranxbit_core::registrar::{
    Registrar, RegistrarError, RegistrationOutcome, RegistrationRequest,
};

/// Development registrar that accepts each email once.
#[derive(Debug, Default)]
pub struct LocalRegistrar {
    emails: Mutex<HashSet<String>>,
}

impl LocalRegistrar {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Registrar for LocalRegistrar {
    async fn register(
        &self,
        request: RegistrationRequest,
    ) -> Result<RegistrationOutcome, RegistrarError> {
        let key = request.email.trim().to_lowercase();
        let mut emails = self.emails.lock().await;
        if !emails.insert(key) {
            return Err(RegistrarError::new("email is already registered"));
        }
        info!(email = %request.email, "account created in local registrar");
        Ok(RegistrationOutcome::VerifyEmail {
            email: request.email,
        })
    }
}

#[cfg(feature = "auth-service")]
pub use http::HttpRegistrar;

#[cfg(feature = "auth-service")]
mod http {
    use std::time::Duration;

    use async_trait::async_trait;
    use serde::{Deserialize, Serialize};
    use tracing::warn;

    use tranxbit_core::registrar::{
        Registrar, RegistrarError, RegistrationOutcome, RegistrationRequest,
    };

    use crate::config::AuthServiceConfig;

    /// Body of `POST {base_url}/register`.
    #[derive(Serialize)]
    struct RegisterBody<'a> {
        first_name: &'a str,
        last_name: &'a str,
        email: &'a str,
        password: &'a str,
        password_confirmation: &'a str,
    }

    /// Success body: `{"to": "verify-email"}`.
    #[derive(Deserialize)]
    struct RegisterReply {
        #[serde(default)]
        to: Option<String>,
    }

    /// Failure body: `{"message": "..."}`.
    #[derive(Deserialize)]
    struct ErrorReply {
        #[serde(default)]
        message: Option<String>,
    }

    /// Registrar backed by the external authentication service.
    #[derive(Debug, Clone)]
    pub struct HttpRegistrar {
        client: reqwest::Client,
        register_url: String,
    }

    impl HttpRegistrar {
        /// Build a client for the configured service.
        ///
        /// # Errors
        ///
        /// Returns an error if the HTTP client cannot be constructed.
        pub fn new(config: &AuthServiceConfig) -> Result<Self, reqwest::Error> {
            let client = reqwest::Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                .user_agent(concat!("tranxbit-server/", env!("CARGO_PKG_VERSION")))
                .build()?;
            Ok(Self {
                client,
                register_url: format!("{}/register", config.base_url),
            })
        }
    }

    #[async_trait]
    impl Registrar for HttpRegistrar {
        async fn register(
            &self,
            request: RegistrationRequest,
        ) -> Result<RegistrationOutcome, RegistrarError> {
            let body = RegisterBody {
                first_name: &request.first_name,
                last_name: &request.last_name,
                email: &request.email,
                password: &request.password,
                password_confirmation: &request.password,
            };

            let resp = self
                .client
                .post(&self.register_url)
                .json(&body)
                .send()
                .await
                .map_err(|e| {
                    warn!(error = %e, "authentication service unreachable");
                    RegistrarError::new(e.to_string())
                })?;

            let status = resp.status();
            if !status.is_success() {
                let message = resp
                    .json::<ErrorReply>()
                    .await
                    .ok()
                    .and_then(|r| r.message)
                    .unwrap_or_default();
                warn!(status = %status, "authentication service refused registration");
                return Err(RegistrarError::new(message));
            }

            let reply: RegisterReply = resp.json().await.map_err(|e| {
                warn!(error = %e, "unreadable reply from authentication service");
                RegistrarError::fallback()
            })?;

            match reply.to.as_deref() {
                Some("verify-email") => Ok(RegistrationOutcome::VerifyEmail {
                    email: request.email,
                }),
                other => {
                    warn!(next = ?other, "unexpected next step from authentication service");
                    Err(RegistrarError::fallback())
                }
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn request(email: &str) -> RegistrationRequest {
        RegistrationRequest {
            first_name: "Jo".into(),
            last_name: "Do".into(),
            email: email.into(),
            password: "Passw0rd!".into(),
        }
    }

    #[tokio::test]
    async fn local_registrar_accepts_each_email_once() {
        let registrar = LocalRegistrar::new();
        let outcome = registrar.register(request("jo@do.com")).await.unwrap();
        assert_eq!(
            outcome,
            RegistrationOutcome::VerifyEmail {
                email: "jo@do.com".into()
            }
        );

        let err = registrar.register(request(" JO@do.com")).await.unwrap_err();
        assert_eq!(err.message, "email is already registered");

        assert!(registrar.register(request("ann@do.com")).await.is_ok());
    }

    #[cfg(feature = "auth-service")]
    mod http_registrar {
        use axum::http::StatusCode;
        use axum::routing::post;
        use axum::{Json, Router};
        use serde_json::{Value, json};
        use tokio::net::TcpListener;

        use super::super::HttpRegistrar;
        use super::request;
        use crate::config::AuthServiceConfig;
        use tranxbit_core::registrar::{Registrar, RegistrarError, RegistrationOutcome};

        async fn fake_auth_service() -> String {
            async fn register(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
                if body["password"] != body["password_confirmation"] {
                    return (StatusCode::BAD_REQUEST, Json(json!({ "message": "mismatch" })));
                }
                match body["email"].as_str() {
                    Some("taken@do.com") => (
                        StatusCode::UNPROCESSABLE_ENTITY,
                        Json(json!({ "message": "The email has already been taken." })),
                    ),
                    Some("silent@do.com") => (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({}))),
                    Some("odd@do.com") => (StatusCode::OK, Json(json!({ "to": "dashboard" }))),
                    _ => (StatusCode::OK, Json(json!({ "to": "verify-email" }))),
                }
            }

            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            let app = Router::new().route("/api/register", post(register));
            tokio::spawn(async move {
                axum::serve(listener, app).await.unwrap();
            });
            format!("http://{addr}/api")
        }

        async fn registrar() -> HttpRegistrar {
            HttpRegistrar::new(&AuthServiceConfig {
                base_url: fake_auth_service().await,
                timeout_secs: 5,
            })
            .unwrap()
        }

        #[tokio::test]
        async fn verify_email_reply_is_success() {
            let outcome = registrar().await.register(request("jo@do.com")).await.unwrap();
            assert_eq!(
                outcome,
                RegistrationOutcome::VerifyEmail {
                    email: "jo@do.com".into()
                }
            );
        }

        #[tokio::test]
        async fn service_message_is_passed_through() {
            let err = registrar()
                .await
                .register(request("taken@do.com"))
                .await
                .unwrap_err();
            assert_eq!(err.message, "The email has already been taken.");
        }

        #[tokio::test]
        async fn missing_message_uses_fallback() {
            let r = registrar().await;
            let err = r.register(request("silent@do.com")).await.unwrap_err();
            assert_eq!(err.message, RegistrarError::FALLBACK_MESSAGE);

            let err = r.register(request("odd@do.com")).await.unwrap_err();
            assert_eq!(err.message, RegistrarError::FALLBACK_MESSAGE);
        }
    }
}
