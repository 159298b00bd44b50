//! espbridge error types

use thiserror::Error;

/// espbridge error type
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Unrecognized command token
    #[error("Invalid command: {0}")]
    Validation(String),

    /// Direct send to the actuator device failed
    #[error("Forward error: {0}")]
    Forward(String),

    /// Shared secret mismatch
    #[error("Unauthorized")]
    Unauthorized,

    /// Camera device unreachable while relaying the stream
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Chat channel error
    #[error("Channel error: {0}")]
    Channel(String),
}

/// Result type alias for espbridge operations
pub type Result<T> = std::result::Result<T, Error>;

impl axum::response::IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        use axum::http::StatusCode;

        // The wire surface keeps the original Spanish messages; the
        // Display form with full context goes to the log instead.
        match &self {
            Error::Validation(_) => (
                StatusCode::BAD_REQUEST,
                axum::Json(serde_json::json!({"error": "Comando inválido"})),
            )
                .into_response(),
            Error::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                axum::Json(serde_json::json!({"error": "No autorizado"})),
            )
                .into_response(),
            Error::Upstream(_) => (
                StatusCode::BAD_GATEWAY,
                "Error al conectar con ESP32-CAM".to_string(),
            )
                .into_response(),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                axum::Json(serde_json::json!({"error": self.to_string()})),
            )
                .into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    #[test]
    fn test_display_includes_context() {
        let err = Error::Forward("connection refused".to_string());
        assert!(err.to_string().contains("connection refused"));

        let err = Error::Validation("xyz".to_string());
        assert!(err.to_string().contains("xyz"));
    }

    #[test]
    fn test_response_status_mapping() {
        let resp = Error::Validation("xyz".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = Error::Unauthorized.into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let resp = Error::Upstream("refused".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

        let resp = Error::Forward("down".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
