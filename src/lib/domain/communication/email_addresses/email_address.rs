//! Email Address

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use EmailAddressError::*;

lazy_static! {
    static ref EMAIL_REGEX: Regex = Regex::new(r"^[^@\s]+@[^@\s.]+(\.[^@\s.]+)+$").unwrap();
}

/// An error that can occur when creating an email address
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EmailAddressError {
    /// The email address is empty
    #[error("email is empty")]
    EmptyEmailAddress,

    /// The email address is invalid
    #[error("email is invalid")]
    InvalidEmailAddress,
}

/// A syntactically valid email address
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new email address from untrusted input
    pub fn new(raw: &str) -> Result<Self, EmailAddressError> {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(EmptyEmailAddress);
        }

        if !EMAIL_REGEX.is_match(trimmed) {
            return Err(InvalidEmailAddress);
        }

        Ok(Self(trimmed.to_string()))
    }

    /// The address as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<EmailAddress> for String {
    fn from(email: EmailAddress) -> Self {
        email.0
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn test_email_address_display() -> TestResult {
        let email = EmailAddress::new("email@example.com")?;

        assert_eq!(format!("{}", email), "email@example.com".to_string());

        Ok(())
    }

    #[test]
    fn test_email_address_is_trimmed() -> TestResult {
        let email = EmailAddress::new("  email@example.com \n")?;

        assert_eq!(email.as_str(), "email@example.com");

        Ok(())
    }

    #[test]
    fn test_empty_email_address_is_invalid() {
        assert_eq!(EmailAddress::new("   "), Err(EmptyEmailAddress));
    }

    #[test]
    fn test_email_address_without_at_symbol_is_invalid() {
        assert_eq!(EmailAddress::new("email"), Err(InvalidEmailAddress));
    }

    #[test]
    fn test_email_address_without_domain_is_invalid() {
        assert_eq!(EmailAddress::new("email@localhost"), Err(InvalidEmailAddress));
        assert_eq!(EmailAddress::new("not-an-email"), Err(InvalidEmailAddress));

        for degenerate in ["@.", "a@.", "@x.com", "a@.com", "a@x.", "a@x..com"] {
            assert_eq!(
                EmailAddress::new(degenerate),
                Err(InvalidEmailAddress),
                "{degenerate} should be rejected"
            );
        }
    }

    #[test]
    fn test_email_address_with_subdomain_is_valid() -> TestResult {
        let email = EmailAddress::new("jane@mail.example.co.uk")?;

        assert_eq!(email.as_str(), "jane@mail.example.co.uk");

        Ok(())
    }

    #[test]
    fn test_email_address_with_whitespace_is_invalid() {
        assert_eq!(
            EmailAddress::new("jane doe@example.com"),
            Err(InvalidEmailAddress)
        );
    }

    #[test]
    fn test_valid_email_to_string() -> TestResult {
        let email = EmailAddress::new("email@example.com")?;

        assert_eq!(String::from(email), "email@example.com".to_string());

        Ok(())
    }
}
