//! Email provider port

use std::{fmt, sync::Arc};

use async_trait::async_trait;

#[cfg(test)]
use mockall::mock;

use crate::domain::communication::{credentials::Credential, message::EmailMessage};

use super::SendOutcome;

/// A transactional email API able to deliver an [`EmailMessage`]
#[async_trait]
pub trait EmailProvider: Send + Sync + 'static {
    /// The provider's name, for logs
    fn name(&self) -> &'static str;

    /// Sends a message.
    ///
    /// # Arguments
    /// * `message` - The message to deliver.
    /// * `credential` - The secret the provider expects.
    ///
    /// # Returns
    /// The [`SendOutcome`]. Never fails: transport problems are reported as
    /// [`SendOutcome::Unreachable`].
    async fn send(&self, message: &EmailMessage, credential: &Credential) -> SendOutcome;
}

#[cfg(test)]
mock! {
    pub EmailProvider {}

    #[async_trait]
    impl EmailProvider for EmailProvider {
        fn name(&self) -> &'static str;
        async fn send(&self, message: &EmailMessage, credential: &Credential) -> SendOutcome;
    }
}

/// A provider paired with the credential to use with it
#[derive(Clone)]
pub struct ConfiguredProvider {
    /// The provider
    pub provider: Arc<dyn EmailProvider>,

    /// Its credential
    pub credential: Credential,
}

impl ConfiguredProvider {
    /// Pairs a provider with a credential
    pub fn new(provider: Arc<dyn EmailProvider>, credential: Credential) -> Self {
        Self {
            provider,
            credential,
        }
    }
}

impl fmt::Debug for ConfiguredProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfiguredProvider")
            .field("provider", &self.provider.name())
            .field("credential", &self.credential)
            .finish()
    }
}
