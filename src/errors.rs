use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Input problems the visitor can fix in place. The message is shown next to the field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter your name")]
    EmptyName,

    #[error("Please enter a valid phone number")]
    ShortPhone,

    #[error("Please select a time slot")]
    NoTimeSelected,

    #[error("Past dates cannot be booked")]
    PastDate,

    #[error("{0} is not an available time slot")]
    UnknownSlot(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerificationError {
    #[error("Invalid OTP. Please try again.")]
    InvalidCode,

    #[error("Please request an OTP first")]
    OtpNotRequested,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Verification(#[from] VerificationError),

    #[error("Could not send the verification code: {0}")]
    Delivery(String),

    #[error("Please verify your phone number first")]
    NotVerified,

    #[error("{0} is not possible at this step")]
    WrongStep(&'static str),
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Wizard(#[from] WizardError),

    #[error("{0}")]
    Validation(String),

    #[error("not found: {0}")]
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Wizard(WizardError::Validation(_))
            | AppError::Wizard(WizardError::Verification(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Wizard(WizardError::Delivery(_)) => StatusCode::BAD_GATEWAY,
            AppError::Wizard(WizardError::NotVerified) => StatusCode::FORBIDDEN,
            AppError::Wizard(WizardError::WrongStep(_)) => StatusCode::CONFLICT,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
        };

        let body = serde_json::json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}
