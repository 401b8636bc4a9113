use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;
use storage::error::StorageError;
use storage::services::lifecycle::ReasonCode;
use validator::ValidationErrors;

/// Web layer errors
#[derive(Debug)]
pub enum WebError {
    Storage(StorageError),
    Validation(ValidationErrors),
    BadRequest(String),
    Unauthorized(String),
    Forbidden,
    NotFound,
    /// The lifecycle rules denied a write. Carries the machine-readable
    /// reason so clients can branch without parsing the message.
    Ineligible(ReasonCode),
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(e) => write!(f, "Storage error: {}", e),
            Self::Validation(e) => write!(f, "Validation error: {}", e),
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            Self::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            Self::Forbidden => write!(f, "Forbidden"),
            Self::NotFound => write!(f, "Resource not found"),
            Self::Ineligible(reason) => write!(f, "Not eligible: {}", reason.message()),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status_code = match &self {
            Self::Storage(StorageError::NotFound) => StatusCode::NOT_FOUND,
            Self::Storage(StorageError::ConstraintViolation(_)) => StatusCode::CONFLICT,
            Self::Storage(StorageError::DuplicateRegistration) => StatusCode::CONFLICT,
            Self::Storage(StorageError::DuplicateSubmission) => StatusCode::CONFLICT,
            Self::Storage(e) if e.is_foreign_key_violation() => StatusCode::CONFLICT,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Ineligible(_) => StatusCode::CONFLICT,
        };

        let body = match &self {
            Self::Storage(StorageError::NotFound) => {
                json!({
                    "error": "Resource not found"
                })
            }
            Self::Storage(StorageError::ConstraintViolation(msg)) => {
                json!({
                    "error": msg
                })
            }
            // Duplicate rows read exactly like the denied pre-check, so the
            // loser of an insert race cannot tell the two apart.
            Self::Storage(StorageError::DuplicateRegistration) => {
                json!({
                    "error": ReasonCode::AlreadyRegistered.message(),
                    "reason": ReasonCode::AlreadyRegistered
                })
            }
            Self::Storage(StorageError::DuplicateSubmission) => {
                json!({
                    "error": ReasonCode::AlreadySubmitted.message(),
                    "reason": ReasonCode::AlreadySubmitted
                })
            }
            Self::Storage(e) if e.is_foreign_key_violation() => {
                json!({
                    "error": "Referenced record does not exist"
                })
            }
            Self::Storage(e) => {
                tracing::error!("Storage error: {:?}", e);
                json!({
                    "error": "An internal error occurred"
                })
            }
            Self::Validation(errors) => {
                let field_errors: Vec<String> = errors
                    .field_errors()
                    .iter()
                    .flat_map(|(field, errors)| {
                        errors.iter().map(move |e| {
                            format!(
                                "{}: {}",
                                field,
                                e.message
                                    .as_ref()
                                    .map(|m| m.to_string())
                                    .unwrap_or_else(|| e.code.to_string())
                            )
                        })
                    })
                    .collect();

                json!({
                    "error": "Validation failed",
                    "details": field_errors
                })
            }
            Self::BadRequest(msg) => {
                json!({
                    "error": msg
                })
            }
            Self::Unauthorized(msg) => {
                json!({
                    "error": msg
                })
            }
            Self::Forbidden => {
                json!({
                    "error": "Admin access required"
                })
            }
            Self::NotFound => {
                json!({
                    "error": "Resource not found"
                })
            }
            Self::Ineligible(reason) => {
                json!({
                    "error": reason.message(),
                    "reason": reason
                })
            }
        };

        (status_code, Json(body)).into_response()
    }
}

impl From<StorageError> for WebError {
    fn from(error: StorageError) -> Self {
        Self::Storage(error)
    }
}

impl From<ValidationErrors> for WebError {
    fn from(error: ValidationErrors) -> Self {
        Self::Validation(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_ineligible_maps_to_conflict_with_reason() {
        let response = WebError::Ineligible(ReasonCode::DeadlinePassed).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let body = body_json(response).await;
        assert_eq!(body["reason"], "DEADLINE_PASSED");
        assert_eq!(body["error"], ReasonCode::DeadlinePassed.message());
    }

    #[tokio::test]
    async fn test_duplicate_registration_reads_like_precheck_denial() {
        let response = WebError::from(StorageError::DuplicateRegistration).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let body = body_json(response).await;
        assert_eq!(body["reason"], "ALREADY_REGISTERED");
        assert_eq!(body["error"], ReasonCode::AlreadyRegistered.message());
    }

    #[tokio::test]
    async fn test_duplicate_submission_reads_like_precheck_denial() {
        let response = WebError::from(StorageError::DuplicateSubmission).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let body = body_json(response).await;
        assert_eq!(body["reason"], "ALREADY_SUBMITTED");
        assert_eq!(body["error"], ReasonCode::AlreadySubmitted.message());
    }

    #[tokio::test]
    async fn test_not_found_and_forbidden_status_codes() {
        assert_eq!(
            WebError::from(StorageError::NotFound).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            WebError::Forbidden.into_response().status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            WebError::Unauthorized("Missing X-User-Id header".to_string())
                .into_response()
                .status(),
            StatusCode::UNAUTHORIZED
        );
    }
}
