//! Sequential failover across configured providers

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

#[cfg(test)]
use mockall::mock;

use crate::domain::communication::message::EmailMessage;

use super::{ConfiguredProvider, SendOutcome};

/// Tries each provider in order and stops at the first one that accepts the
/// message.
///
/// When every provider fails, the last final (non-transient) outcome wins.
/// When every failure was transient the last one is returned, and an empty
/// list is [`SendOutcome::Unreachable`].
pub async fn send_with_failover(
    message: &EmailMessage,
    providers: &[ConfiguredProvider],
) -> SendOutcome {
    let mut last_final = None;
    let mut last_transient = None;

    for configured in providers {
        let provider = configured.provider.name();
        let outcome = configured
            .provider
            .send(message, &configured.credential)
            .await;

        if outcome.is_sent() {
            info!(provider, recipients = message.to().len(), "email sent");

            return outcome;
        }

        warn!(provider, outcome = outcome.label(), "email provider failed");

        if outcome.is_transient() {
            last_transient = Some(outcome);
        } else {
            last_final = Some(outcome);
        }
    }

    last_final
        .or(last_transient)
        .unwrap_or(SendOutcome::Unreachable)
}

/// Relays messages through whatever providers are configured
#[async_trait]
pub trait EmailRelay: Clone + Send + Sync + 'static {
    /// Delivers a message through the first provider that accepts it.
    async fn relay(&self, message: &EmailMessage) -> SendOutcome;
}

#[cfg(test)]
mock! {
    pub EmailRelay {}

    impl Clone for EmailRelay {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl EmailRelay for EmailRelay {
        async fn relay(&self, message: &EmailMessage) -> SendOutcome;
    }
}

/// [`EmailRelay`] backed by an ordered provider list
#[derive(Debug, Clone)]
pub struct FailoverRelay {
    providers: Arc<Vec<ConfiguredProvider>>,
}

impl FailoverRelay {
    /// Creates a relay trying `providers` in order
    pub fn new(providers: Vec<ConfiguredProvider>) -> Self {
        Self {
            providers: Arc::new(providers),
        }
    }

    /// The number of configured providers
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether no provider is configured
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

#[async_trait]
impl EmailRelay for FailoverRelay {
    async fn relay(&self, message: &EmailMessage) -> SendOutcome {
        send_with_failover(message, &self.providers).await
    }
}
