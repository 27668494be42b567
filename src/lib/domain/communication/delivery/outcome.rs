//! Send outcome

use std::time::Duration;

/// The result of one attempt to hand a message to a provider
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SendOutcome {
    /// The provider accepted the message
    Sent,

    /// The provider refused the credential (HTTP 401/403), or the credential
    /// has the wrong shape for the provider
    InvalidCredential,

    /// The provider is throttling us (HTTP 429)
    RateLimited {
        /// How long the provider asked us to wait, when it said so
        retry_after: Option<Duration>,
    },

    /// The provider refused the message
    Rejected {
        /// What the provider said
        detail: String,
    },

    /// No usable response: network, DNS, TLS or encoding failure
    Unreachable,
}

impl SendOutcome {
    /// Whether the message was accepted
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent)
    }

    /// Whether the failure may clear up by itself
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::RateLimited { .. } | Self::Unreachable)
    }

    /// Short label for logs
    pub fn label(&self) -> &'static str {
        match self {
            Self::Sent => "sent",
            Self::InvalidCredential => "invalid_credential",
            Self::RateLimited { .. } => "rate_limited",
            Self::Rejected { .. } => "rejected",
            Self::Unreachable => "unreachable",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_outcomes() {
        assert!(SendOutcome::Unreachable.is_transient());
        assert!(SendOutcome::RateLimited { retry_after: None }.is_transient());
        assert!(!SendOutcome::InvalidCredential.is_transient());
        assert!(!SendOutcome::Rejected {
            detail: "bad".to_string()
        }
        .is_transient());
        assert!(!SendOutcome::Sent.is_transient());
    }
}
