//! Standardized API response types.
//!
//! Account endpoints answer with an [`ApiResponse`] envelope; reminder and
//! authentication failures use the [`ErrorResponse`] list format.

use serde::{Deserialize, Serialize};

/// `{"success": bool, "data": ...}` envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }

    pub fn fail(data: T) -> Self {
        Self {
            success: false,
            data,
        }
    }
}

/// Category of a failed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    ValidationError,
    ClientError,
    ServerError,
}

/// One problem with a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable reason, e.g. `required` or `not_authenticated`.
    pub code: String,
    /// Human-readable explanation.
    pub detail: String,
    /// Offending request field, when the problem is tied to one.
    pub attr: Option<String>,
}

/// `{"type": ..., "errors": [{"code", "detail", "attr"}]}` error body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(rename = "type")]
    pub error_type: ErrorType,
    pub errors: Vec<ErrorDetail>,
}

impl ErrorResponse {
    pub fn new(error_type: ErrorType) -> Self {
        Self {
            error_type,
            errors: Vec::new(),
        }
    }

    pub fn with_error(
        mut self,
        code: impl Into<String>,
        detail: impl Into<String>,
        attr: Option<&str>,
    ) -> Self {
        self.errors.push(ErrorDetail {
            code: code.into(),
            detail: detail.into(),
            attr: attr.map(str::to_string),
        });
        self
    }

    // Common error constructors
    pub fn client_error(code: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(ErrorType::ClientError).with_error(code, detail, None)
    }

    pub fn not_authenticated() -> Self {
        Self::client_error(
            "not_authenticated",
            "Authentication credentials were not provided.",
        )
    }

    pub fn authentication_failed(detail: impl Into<String>) -> Self {
        Self::client_error("authentication_failed", detail)
    }

    pub fn internal_error() -> Self {
        Self::new(ErrorType::ServerError).with_error("error", "A server error occurred.", None)
    }
}
