use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Internal Error: {0}")]
    Internal(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("External service error: {0}")]
    ExternalService(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Session error: {0}")]
    Session(String),
}

impl AppError {
    /// Maps a failed backend response onto the error it represents.
    pub fn from_status(status: u16, detail: impl Into<String>) -> Self {
        let detail = detail.into();
        let error = match status {
            401 | 403 => AppError::Auth(detail),
            404 => AppError::NotFound(detail),
            400 => AppError::BadRequest(detail),
            409 => AppError::Conflict(detail),
            422 => AppError::ValidationError(detail),
            500..=599 => AppError::ExternalService(format!("({}) {}", status, detail)),
            _ => AppError::Internal(format!("unexpected status {}: {}", status, detail)),
        };

        tracing::error!("Backend error: {}", error);
        error
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, AppError::Auth(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert!(matches!(AppError::from_status(401, "x"), AppError::Auth(_)));
        assert!(matches!(AppError::from_status(403, "x"), AppError::Auth(_)));
        assert!(matches!(AppError::from_status(404, "x"), AppError::NotFound(_)));
        assert!(matches!(AppError::from_status(400, "x"), AppError::BadRequest(_)));
        assert!(matches!(AppError::from_status(409, "x"), AppError::Conflict(_)));
        assert!(matches!(AppError::from_status(422, "x"), AppError::ValidationError(_)));
        assert!(matches!(AppError::from_status(502, "x"), AppError::ExternalService(_)));
        assert!(matches!(AppError::from_status(418, "x"), AppError::Internal(_)));
    }

    #[test]
    fn test_detail_is_kept() {
        let err = AppError::from_status(400, "Username already taken");
        assert_eq!(err.to_string(), "Bad Request: Username already taken");
    }
}
