//! Error handling - maps domain failures to their HTTP status and wire body.

use actix_web::{HttpResponse, ResponseError, http::StatusCode, http::header};
use std::collections::BTreeMap;

use remindme_core::error::{DomainError, RepoError};
use remindme_core::ports::AuthError;
use remindme_core::ValidationErrors;
use remindme_shared::dto::{DetailResponse, FieldErrorsResponse};
use remindme_shared::{ApiResponse, ErrorResponse, ErrorType};

/// Application-level error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Field errors in the account envelope (422).
    #[error("Invalid fields: {0}")]
    FieldErrors(ValidationErrors),

    /// Field errors in the list format (400).
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// Request body is not JSON of the expected shape (400).
    #[error("Malformed body: {0}")]
    MalformedBody(String),

    /// Missing login fields, rendered in the account envelope (400).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Unknown username or wrong password (404).
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// No credentials supplied (401).
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Credentials supplied but rejected (401).
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Resource addressed by id does not exist (422).
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::FieldErrors(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials => StatusCode::NOT_FOUND,
            AppError::NotAuthenticated => StatusCode::UNAUTHORIZED,
            AppError::AuthenticationFailed(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());

        match self {
            AppError::FieldErrors(errors) => {
                let mut by_field: BTreeMap<String, Vec<String>> = BTreeMap::new();
                for error in errors.iter() {
                    by_field
                        .entry(error.field.to_string())
                        .or_default()
                        .push(error.message.clone());
                }
                builder.json(ApiResponse::fail(FieldErrorsResponse { errors: by_field }))
            }
            AppError::Validation(errors) => {
                let body = errors
                    .iter()
                    .fold(ErrorResponse::new(ErrorType::ValidationError), |body, e| {
                        body.with_error(e.code, e.message.clone(), Some(e.field))
                    });
                builder.json(body)
            }
            AppError::MalformedBody(detail) => {
                builder.json(ErrorResponse::client_error("parse_error", detail.clone()))
            }
            AppError::BadRequest(detail) => {
                builder.json(ApiResponse::fail(DetailResponse::new(detail.clone())))
            }
            AppError::InvalidCredentials => builder.json(ApiResponse::fail(DetailResponse::new(
                "Invalid username or password.",
            ))),
            AppError::NotAuthenticated => builder
                .insert_header((header::WWW_AUTHENTICATE, "Bearer"))
                .json(ErrorResponse::not_authenticated()),
            AppError::AuthenticationFailed(detail) => builder
                .insert_header((header::WWW_AUTHENTICATE, "Bearer"))
                .json(ErrorResponse::authentication_failed(detail.clone())),
            AppError::NotFound(detail) => {
                builder.json(ErrorResponse::client_error("not_found", detail.clone()))
            }
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                builder.json(ErrorResponse::internal_error())
            }
        }
    }
}

// Conversion from domain errors
impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { entity_type, id } => {
                AppError::NotFound(format!("{} with id {} not found.", entity_type, id))
            }
            DomainError::Validation(errors) => AppError::Validation(errors),
            DomainError::WeakPassword(errors) => AppError::FieldErrors(errors),
            DomainError::Auth(err) => err.into(),
            DomainError::Repository(err) => err.into(),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => AppError::InvalidCredentials,
            AuthError::MissingCredentials => {
                AppError::BadRequest("Username or password is missing.".to_string())
            }
            AuthError::InvalidToken(detail) => AppError::AuthenticationFailed(detail),
            AuthError::HashingError(detail) => AppError::Internal(detail),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AppError::NotFound("Resource not found.".to_string()),
            RepoError::Constraint(msg) => {
                tracing::error!("Unexpected constraint violation: {}", msg);
                AppError::Internal("Database error".to_string())
            }
            RepoError::Connection(msg) => {
                tracing::error!("Database connection error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
            RepoError::Query(msg) => {
                tracing::error!("Database query error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use uuid::Uuid;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.error_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body()).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[actix_web::test]
    async fn test_field_errors_grouped_by_field() {
        let mut errors = ValidationErrors::single("password", "password_too_short", "short");
        errors.add("password", "password_too_common", "common");
        errors.add("username", "blank", "blank");

        let (status, body) = body_json(AppError::FieldErrors(errors)).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["success"], false);
        assert_eq!(body["data"]["errors"]["password"], serde_json::json!(["short", "common"]));
        assert_eq!(body["data"]["errors"]["username"], serde_json::json!(["blank"]));
    }

    #[actix_web::test]
    async fn test_validation_errors_listed_with_attr() {
        let errors = ValidationErrors::single("reminder_title", "blank", "may not be blank");

        let (status, body) = body_json(AppError::Validation(errors)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["type"], "validation_error");
        assert_eq!(body["errors"][0]["attr"], "reminder_title");
        assert_eq!(body["errors"][0]["code"], "blank");
    }

    #[test]
    fn test_domain_error_statuses() {
        let not_found: AppError = DomainError::NotFound {
            entity_type: "Reminder",
            id: Uuid::nil(),
        }
        .into();
        assert_eq!(not_found.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

        let creds: AppError = DomainError::Auth(AuthError::InvalidCredentials).into();
        assert_eq!(creds.status_code(), StatusCode::NOT_FOUND);

        let missing: AppError = DomainError::Auth(AuthError::MissingCredentials).into();
        assert_eq!(missing.status_code(), StatusCode::BAD_REQUEST);

        let db: AppError = DomainError::Repository(RepoError::Query("boom".into())).into();
        assert_eq!(db.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[actix_web::test]
    async fn test_internal_error_hides_detail() {
        let (status, body) = body_json(AppError::Internal("secret detail".into())).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.to_string().contains("secret detail"));
    }
}
