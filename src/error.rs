use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    // Operand errors
    #[error("Invalid operand: {0}")]
    InvalidOperand(String),

    #[error("Domain error: {0}")]
    DomainError(String),

    // Capability errors
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    // Routing errors
    #[error("Missing parameter: {0}")]
    MissingParameter(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl CalcError {
    pub fn kind(&self) -> &'static str {
        match self {
            CalcError::InvalidOperand(_) => "InvalidOperand",
            CalcError::DomainError(_) => "DomainError",
            CalcError::PermissionDenied(_) => "PermissionDenied",
            CalcError::MissingParameter(_) => "MissingParameter",
            CalcError::NotFound(_) => "NotFound",
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ResponseError for CalcError {
    fn status_code(&self) -> StatusCode {
        match self {
            CalcError::InvalidOperand(_) => StatusCode::BAD_REQUEST,
            CalcError::DomainError(_) => StatusCode::BAD_REQUEST,
            CalcError::PermissionDenied(_) => StatusCode::BAD_REQUEST,

            CalcError::MissingParameter(_) => StatusCode::NOT_FOUND,
            CalcError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.kind().to_string(),
            message: self.to_string(),
        })
    }
}

pub type CalcResult<T> = Result<T, CalcError>;
