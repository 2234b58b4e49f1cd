//! User identity and profile types.
//!
//! Constructors validate string inputs so adapters can parse at the boundary
//! and hand the domain only well-formed values.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors for user identity fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// Identifier was not a valid UUID.
    #[error("user id must be a valid UUID")]
    InvalidId,
    /// Email did not match the accepted address pattern.
    #[error("email address is not valid")]
    InvalidEmail,
    /// A profile field was empty after trimming.
    #[error("{field} must not be empty")]
    EmptyField {
        /// Name of the offending profile field.
        field: &'static str,
    },
}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a new random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl FromStr for UserId {
    type Err = UserValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(value)
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        let pattern = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Validated email address, compared case-insensitively for uniqueness.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an address. Input is trimmed and lowercased.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let normalised = raw.as_ref().trim().to_lowercase();
        if !email_regex().is_match(&normalised) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(normalised))
    }

    /// The normalised address string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Opaque, already-hashed credential material.
///
/// Never serialised and redacted from `Debug` output so hashes cannot leak
/// through logs.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash string produced by a hashing adapter.
    #[must_use]
    pub fn from_encoded(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encoded hash string for storage or verification.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// Contact and name fields captured at registration.
///
/// ## Invariants
/// - Every field is trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    first_name: String,
    last_name: String,
    address: String,
    phone_number: String,
}

fn required(field: &'static str, value: &str) -> Result<String, UserValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(UserValidationError::EmptyField { field });
    }
    Ok(trimmed.to_owned())
}

impl UserProfile {
    /// Validate and construct a profile from raw string parts.
    pub fn try_from_parts(
        first_name: &str,
        last_name: &str,
        address: &str,
        phone_number: &str,
    ) -> Result<Self, UserValidationError> {
        Ok(Self {
            first_name: required("firstName", first_name)?,
            last_name: required("lastName", last_name)?,
            address: required("address", address)?,
            phone_number: required("phoneNumber", phone_number)?,
        })
    }

    /// Given name.
    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Family name.
    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Postal address.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Contact phone number.
    #[must_use]
    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }
}

/// A registered account. Immutable after registration in this scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    email: EmailAddress,
    profile: UserProfile,
    created_at: DateTime<Utc>,
}

impl User {
    /// Assemble a user from validated parts.
    #[must_use]
    pub fn new(
        id: UserId,
        email: EmailAddress,
        profile: UserProfile,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email,
            profile,
            created_at,
        }
    }

    /// Stable identifier.
    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Unique registered email.
    #[must_use]
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Name and contact details.
    #[must_use]
    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Registration timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("alice@example.com")]
    #[case("  Bob.Smith@Sub.Example.ORG ")]
    fn valid_emails_are_normalised(#[case] raw: &str) {
        let email = EmailAddress::new(raw).expect("valid email");
        assert_eq!(email.as_str(), raw.trim().to_lowercase());
    }

    #[rstest]
    #[case("")]
    #[case("no-at-sign.example.com")]
    #[case("two@@example.com ok")]
    #[case("missing@tld")]
    #[case("spaces in@example.com")]
    fn invalid_emails_are_rejected(#[case] raw: &str) {
        let err = EmailAddress::new(raw).expect_err("invalid email must fail");
        assert_eq!(err, UserValidationError::InvalidEmail);
    }

    #[rstest]
    fn profile_rejects_blank_fields() {
        let err = UserProfile::try_from_parts("Ada", " ", "1 Way", "555-0100")
            .expect_err("blank last name must fail");
        assert_eq!(err, UserValidationError::EmptyField { field: "lastName" });
    }

    #[rstest]
    fn profile_trims_fields() {
        let profile = UserProfile::try_from_parts(" Ada ", "Lovelace", "1 Way", "555-0100")
            .expect("valid profile");
        assert_eq!(profile.first_name(), "Ada");
    }

    #[rstest]
    fn password_hash_debug_is_redacted() {
        let hash = PasswordHash::from_encoded("$argon2id$v=19$secret");
        assert_eq!(format!("{hash:?}"), "PasswordHash(<redacted>)");
    }

    #[rstest]
    fn user_id_parses_round_trip() {
        let id = UserId::random();
        let parsed: UserId = id.to_string().parse().expect("round trip");
        assert_eq!(parsed, id);
    }

    #[rstest]
    fn user_id_rejects_garbage() {
        let err = "not-a-uuid".parse::<UserId>().expect_err("must fail");
        assert_eq!(err, UserValidationError::InvalidId);
    }
}
