//! Credential value types: raw passwords and login payloads.
//!
//! Raw password material is wrapped in zeroizing storage so it is wiped from
//! memory on drop and never appears in `Debug` output or logs.

use std::fmt;

use zeroize::Zeroizing;

/// Why a candidate password failed the strength policy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordPolicyError {
    /// Shorter than the minimum length.
    #[error("password must be at least {min} characters")]
    TooShort {
        /// Minimum accepted length.
        min: usize,
    },
    /// No uppercase letter present.
    #[error("password must contain an uppercase letter")]
    MissingUppercase,
    /// No lowercase letter present.
    #[error("password must contain a lowercase letter")]
    MissingLowercase,
    /// No decimal digit present.
    #[error("password must contain a digit")]
    MissingDigit,
}

/// Minimum accepted password length.
pub const PASSWORD_MIN_LEN: usize = 8;

/// A raw password that satisfied the registration strength policy.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Validate a candidate password against the policy: at least
    /// [`PASSWORD_MIN_LEN`] characters with one uppercase letter, one
    /// lowercase letter, and one digit.
    pub fn new(raw: impl Into<String>) -> Result<Self, PasswordPolicyError> {
        let raw = Zeroizing::new(raw.into());
        if raw.chars().count() < PASSWORD_MIN_LEN {
            return Err(PasswordPolicyError::TooShort {
                min: PASSWORD_MIN_LEN,
            });
        }
        if !raw.chars().any(|c| c.is_ascii_uppercase()) {
            return Err(PasswordPolicyError::MissingUppercase);
        }
        if !raw.chars().any(|c| c.is_ascii_lowercase()) {
            return Err(PasswordPolicyError::MissingLowercase);
        }
        if !raw.chars().any(|c| c.is_ascii_digit()) {
            return Err(PasswordPolicyError::MissingDigit);
        }
        Ok(Self(raw))
    }

    /// Borrow the raw password for hashing or verification.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Raw login payload. The email is kept as entered (modulo trimming) and the
/// password is not policy-checked; both are compared against stored
/// credentials by the account service.
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

/// Validation errors for login payloads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// Email was blank after trimming.
    #[error("email must not be empty")]
    EmptyEmail,
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(LoginValidationError::EmptyEmail);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            email: email.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email string suitable for account lookups.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password string provided by the caller.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}
