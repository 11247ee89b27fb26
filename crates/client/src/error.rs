use qms_core::types::DbId;

/// Errors surfaced by the HTTP client and the API modules.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (timeout, refused, DNS, TLS).
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered 401. The session has already been cleared.
    #[error("Unauthorized")]
    Unauthorized,

    /// Any other non-2xx answer.
    #[error("Server error ({status}): {message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// The `error` field of the body, or the raw body.
        message: String,
    },

    /// A single-record fetch answered 404.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// The body did not match the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),
}

impl ApiError {
    /// Text shown to the user in a notice.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Server { message, .. } => message.clone(),
            ApiError::Unauthorized => "Session expired, please log in again".to_string(),
            ApiError::Transport(err) if err.is_timeout() => "Request timed out".to_string(),
            other => other.to_string(),
        }
    }

    /// HTTP status carried by the error, if the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized => Some(401),
            ApiError::Server { status, .. } => Some(*status),
            ApiError::NotFound { .. } => Some(404),
            ApiError::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_is_shown_verbatim() {
        let err = ApiError::Server {
            status: 409,
            message: "SAP code already exists".into(),
        };
        assert_eq!(err.user_message(), "SAP code already exists");
        assert_eq!(err.status(), Some(409));
    }

    #[test]
    fn not_found_names_the_entity() {
        let err = ApiError::NotFound {
            entity: "Supplier",
            id: 7,
        };
        assert_eq!(err.user_message(), "Supplier with id 7 not found");
    }
}
