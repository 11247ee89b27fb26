//! Login form handling.

use std::sync::{Mutex, PoisonError};

use qms_client::{ApiError, ManagementApi};
use qms_models::auth::LoginRequest;

use crate::context::Console;
use crate::notice::Notifier;

const LOGIN_FAILED: &str = "Login failed. Please check your credentials and try again.";

pub struct LoginFlow {
    api: ManagementApi,
    notifier: Notifier,
    error_message: Mutex<String>,
}

impl LoginFlow {
    pub fn new(console: &Console) -> Self {
        Self {
            api: console.api.clone(),
            notifier: console.notifier.clone(),
            error_message: Mutex::new(String::new()),
        }
    }

    /// Log in and store the token and username in the session.
    pub async fn handle_login(&self, credentials: &LoginRequest) -> Result<(), ApiError> {
        self.set_error_message(String::new());

        match self.api.login(credentials).await {
            Ok(response) => {
                let session = self.api.http().session();
                session.set_token(response.token);
                session.set_username(&credentials.username);
                tracing::info!(username = %credentials.username, "Logged in");
                self.notifier.success("Login successful");
                Ok(())
            }
            Err(e) => {
                let message = format!("{LOGIN_FAILED} {}", e.user_message());
                self.notifier.error(message.clone());
                self.set_error_message(message);
                Err(e)
            }
        }
    }

    /// The message of the last failed attempt; empty after a success.
    pub fn error_message(&self) -> String {
        self.error_message
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_error_message(&self, message: String) {
        *self
            .error_message
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = message;
    }
}
