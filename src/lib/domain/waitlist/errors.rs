//! Waitlist errors

use thiserror::Error;

/// Errors that can occur when joining the waitlist.
///
/// The messages are shown to visitors as-is.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WaitlistError {
    /// No email was submitted
    #[error("Email is missing.")]
    EmailMissing,

    /// The submitted email is not an email address
    #[error("Email isn't valid.")]
    InvalidEmail,

    /// The signup could not be forwarded
    #[error("Can't add to waitlist right now. Try later or contact us.")]
    CouldNotNotify,
}

/// Errors that can occur when posting a notification
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotifierError {
    /// The notification endpoint could not be reached
    #[error("notification endpoint is unreachable")]
    Unreachable,

    /// The notification endpoint answered with a non-success status
    #[error("notification endpoint responded with status {status}")]
    Rejected {
        /// The HTTP status code
        status: u16,
    },
}

impl From<NotifierError> for WaitlistError {
    fn from(_err: NotifierError) -> Self {
        WaitlistError::CouldNotNotify
    }
}
