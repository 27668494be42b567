//! Error types for the communication module

use thiserror::Error;

/// Errors that can occur when building an [`EmailMessage`](super::message::EmailMessage)
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MessageError {
    /// The message has no recipients
    #[error("at least one recipient is required")]
    NoRecipients,

    /// One of the addresses is not a valid email address
    #[error("{field} contains an invalid email address: \"{address}\"")]
    InvalidAddress {
        /// The message field holding the address
        field: &'static str,

        /// The offending input
        address: String,
    },
}

/// Errors that can occur when deriving a credential from a raw secret
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CredentialError {
    /// The secret is empty
    #[error("credential is empty")]
    Empty,

    /// A basic-auth secret is not a `user:pass` pair
    #[error("expected a \"user:pass\" pair")]
    MissingSeparator,
}
