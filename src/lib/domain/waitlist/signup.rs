//! Waitlist signup

use crate::domain::communication::email_addresses::{EmailAddress, EmailAddressError};

use super::errors::WaitlistError;

/// A validated waitlist signup
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WaitlistSignup {
    name: Option<String>,
    email: EmailAddress,
}

impl WaitlistSignup {
    /// Validates the submitted form fields.
    pub fn new(name: Option<&str>, email: Option<&str>) -> Result<Self, WaitlistError> {
        let email = EmailAddress::new(email.ok_or(WaitlistError::EmailMissing)?).map_err(
            |err| match err {
                EmailAddressError::EmptyEmailAddress | EmailAddressError::InvalidEmailAddress => {
                    WaitlistError::InvalidEmail
                }
            },
        )?;

        Ok(Self {
            name: name.map(str::to_string),
            email,
        })
    }

    /// The name, as submitted
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The email address
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// The text announced for this signup
    pub fn notification_text(&self) -> String {
        format!(
            "Grids waitlist\nName: {}\nEmail: {}",
            self.name.as_deref().unwrap_or_default(),
            self.email
        )
    }
}
