//! Validated value objects for user accounts.

use once_cell::sync::Lazy;
use regex::Regex;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use subtle::ConstantTimeEq;

use crate::domain::foundation::ValidationError;

/// Minimum accepted password length in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Salt appended to passwords before hashing.
const PASSWORD_SALT: &str = "salt_v1";

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[1-9]\d{1,14}$").expect("phone pattern compiles"));

/// A syntactically valid email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Parses an email address.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` if the value is not `local@domain.tld`
    pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if !is_valid_email(&value) {
            return Err(ValidationError::invalid_format("email", "Invalid email format"));
        }
        Ok(Self(value))
    }

    /// Returns the address.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the part before `@`.
    pub fn local_part(&self) -> &str {
        self.0.split('@').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Email {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

/// Returns true if `value` looks like an email address.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

/// A plaintext password that met the strength policy.
///
/// The secret is never printed by `Debug`.
#[derive(Debug, Clone)]
pub struct Password(SecretString);

impl Password {
    /// Validates a plaintext password.
    ///
    /// # Errors
    ///
    /// - `TooShort` if fewer than [`MIN_PASSWORD_LENGTH`] characters
    pub fn new(plaintext: impl Into<String>) -> Result<Self, ValidationError> {
        let plaintext = plaintext.into();
        let len = plaintext.chars().count();
        if len < MIN_PASSWORD_LENGTH {
            return Err(ValidationError::too_short("password", MIN_PASSWORD_LENGTH, len));
        }
        Ok(Self(SecretString::new(plaintext)))
    }

    /// Hashes this password for storage.
    pub fn hash(&self) -> PasswordHash {
        PasswordHash::of(self.0.expose_secret())
    }
}

/// Returns true if `value` satisfies the password policy.
pub fn is_valid_password(value: &str) -> bool {
    value.chars().count() >= MIN_PASSWORD_LENGTH
}

/// Salted SHA-256 password digest, hex encoded.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasswordHash(String);

impl PasswordHash {
    fn of(plaintext: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(plaintext.as_bytes());
        hasher.update(PASSWORD_SALT.as_bytes());
        Self(hex::encode(hasher.finalize()))
    }

    /// Checks a candidate password against this hash in constant time.
    pub fn verify(&self, candidate: &str) -> bool {
        let other = Self::of(candidate);
        self.0.as_bytes().ct_eq(other.0.as_bytes()).into()
    }

    /// Returns the hex digest.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}

/// An E.164-style phone number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Parses a phone number, ignoring spaces, dashes, dots and parentheses.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` if the cleaned value is not 2-15 digits with an
    ///   optional leading `+`
    pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let cleaned: String = value
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '.' | '(' | ')'))
            .collect();
        if !PHONE_PATTERN.is_match(&cleaned) {
            return Err(ValidationError::invalid_format("phone", "Invalid phone number"));
        }
        Ok(Self(cleaned))
    }

    /// Returns the normalized number.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Formats 10-digit numbers as `(XXX) XXX-XXXX`; others are returned as stored.
    pub fn display(&self) -> String {
        let digits: String = self.0.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.len() == 10 {
            format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..])
        } else {
            self.0.clone()
        }
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<PhoneNumber> for String {
    fn from(phone: PhoneNumber) -> Self {
        phone.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_accepts_valid_address() {
        let email = Email::parse("test@example.com").unwrap();
        assert_eq!(email.local_part(), "test");
    }

    #[test]
    fn email_rejects_malformed_addresses() {
        assert!(Email::parse("invalid").is_err());
        assert!(Email::parse("test@").is_err());
        assert!(Email::parse("a b@example.com").is_err());
    }

    #[test]
    fn password_policy_is_eight_characters() {
        assert!(Password::new("SecurePass123").is_ok());
        assert!(Password::new("Pass1234").is_ok());
        assert!(Password::new("weak").is_err());
        assert!(Password::new("short7").is_err());
        assert!(!is_valid_password("1234567"));
    }

    #[test]
    fn password_debug_hides_secret() {
        let password = Password::new("SecurePass123").unwrap();
        assert!(!format!("{:?}", password).contains("SecurePass123"));
    }

    #[test]
    fn password_hash_is_salted_sha256_hex() {
        let hash = Password::new("SecurePass123").unwrap().hash();
        assert_eq!(hash.as_str().len(), 64);
        assert!(hash.verify("SecurePass123"));
        assert!(!hash.verify("securepass123"));
    }

    #[test]
    fn phone_number_formats_ten_digits() {
        let phone = PhoneNumber::parse("555-123-4567").unwrap();
        assert_eq!(phone.as_str(), "5551234567");
        assert_eq!(phone.display(), "(555) 123-4567");
    }

    #[test]
    fn phone_number_keeps_international_form() {
        let phone = PhoneNumber::parse("+447911123456").unwrap();
        assert_eq!(phone.display(), "+447911123456");
    }

    #[test]
    fn phone_number_rejects_garbage() {
        assert!(PhoneNumber::parse("call me").is_err());
        assert!(PhoneNumber::parse("0123").is_err());
    }
}
