//! Notification channel port

use async_trait::async_trait;

#[cfg(test)]
use mockall::mock;

use super::errors::NotifierError;

/// A chat channel that signups are announced on
#[async_trait]
pub trait Notifier: Clone + Send + Sync + 'static {
    /// Posts a text message to the channel
    async fn notify(&self, text: &str) -> Result<(), NotifierError>;
}

#[cfg(test)]
mock! {
    pub Notifier {}

    impl Clone for Notifier {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl Notifier for Notifier {
        async fn notify(&self, text: &str) -> Result<(), NotifierError>;
    }
}
