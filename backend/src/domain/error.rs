//! Domain-level error type.
//!
//! Transport agnostic: inbound adapters map these values onto HTTP status
//! codes and JSON envelopes. Every domain failure carries a stable
//! machine-readable code plus a human-readable message.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Stable machine-readable code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// No valid identity token accompanied the request.
    NotAuthenticated,
    /// Authenticated but not permitted to perform this action.
    Forbidden,
    /// The requested resource does not exist.
    NotFound,
    /// The email address is already registered.
    DuplicateEmail,
    /// The email address does not match the accepted pattern.
    InvalidEmail,
    /// The password does not satisfy the strength policy.
    WeakPassword,
    /// Email/password pair did not authenticate. Deliberately covers both
    /// unknown accounts and wrong passwords.
    InvalidCredentials,
    /// A user attempted to transact on their own listing.
    SelfTransaction,
    /// The listing is not available for purchase or rental.
    Unavailable,
    /// The rental window is empty or inverted.
    InvalidWindow,
    /// The rental window starts in the past.
    PastStart,
    /// The rental window collides with an existing booking.
    OverlapConflict,
    /// A backing service could not be reached.
    ServiceUnavailable,
    /// An unexpected error occurred inside the domain.
    InternalError,
}

/// Domain error payload surfaced verbatim to callers.
///
/// ## Invariants
/// - `message` must be non-empty once trimmed of whitespace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    #[schema(example = "overlap_conflict")]
    code: ErrorCode,
    #[schema(example = "listing is already rented for the selected dates")]
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

/// Validation error emitted by the fallible constructor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorValidationError {
    /// The message was empty after trimming.
    #[error("error message must not be empty")]
    EmptyMessage,
}

impl Error {
    /// Create a new error, panicking if the message is blank.
    ///
    /// # Panics
    /// Panics when `message` is empty once trimmed; all call sites pass
    /// literal or formatted non-empty messages.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        match Self::try_new(code, message) {
            Ok(value) => value,
            Err(err) => panic!("error messages must satisfy validation: {err}"),
        }
    }

    /// Fallible constructor validating the message content.
    pub fn try_new(
        code: ErrorCode,
        message: impl Into<String>,
    ) -> Result<Self, ErrorValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(ErrorValidationError::EmptyMessage);
        }
        Ok(Self {
            code,
            message,
            details: None,
        })
    }

    /// Stable machine-readable error code.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to adapters.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Supplementary structured details for adapters.
    #[must_use]
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach structured details to the error.
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::NotAuthenticated`].
    pub fn not_authenticated(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotAuthenticated, message)
    }

    /// Convenience constructor for [`ErrorCode::Forbidden`].
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::DuplicateEmail`].
    pub fn duplicate_email(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DuplicateEmail, message)
    }

    /// Convenience constructor for [`ErrorCode::InvalidEmail`].
    pub fn invalid_email(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidEmail, message)
    }

    /// Convenience constructor for [`ErrorCode::WeakPassword`].
    pub fn weak_password(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::WeakPassword, message)
    }

    /// Convenience constructor for [`ErrorCode::InvalidCredentials`].
    pub fn invalid_credentials() -> Self {
        // One message for unknown email and wrong password alike so the
        // response cannot be used to enumerate accounts.
        Self::new(ErrorCode::InvalidCredentials, "invalid email or password")
    }

    /// Convenience constructor for [`ErrorCode::SelfTransaction`].
    pub fn self_transaction(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::SelfTransaction, message)
    }

    /// Convenience constructor for [`ErrorCode::Unavailable`].
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::InvalidWindow`].
    pub fn invalid_window(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidWindow, message)
    }

    /// Convenience constructor for [`ErrorCode::PastStart`].
    pub fn past_start(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::PastStart, message)
    }

    /// Convenience constructor for [`ErrorCode::OverlapConflict`].
    pub fn overlap_conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::OverlapConflict, message)
    }

    /// Convenience constructor for [`ErrorCode::ServiceUnavailable`].
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}
