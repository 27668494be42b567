//! Waitlist service module

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

#[cfg(test)]
use mockall::mock;

use super::{errors::WaitlistError, Notifier, WaitlistSignup};

/// Waitlist service
#[async_trait]
pub trait WaitlistService: Clone + Send + Sync + 'static {
    /// Adds a signup to the waitlist.
    ///
    /// # Arguments
    /// * `signup` - The validated [`WaitlistSignup`].
    ///
    /// # Returns
    /// A [`Result`] which is [`Ok`] if the signup was announced, or an [`Err`]
    /// containing [`WaitlistError::CouldNotNotify`] otherwise.
    async fn join(&self, signup: &WaitlistSignup) -> Result<(), WaitlistError>;
}

#[cfg(test)]
mock! {
    pub WaitlistService {}

    impl Clone for WaitlistService {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl WaitlistService for WaitlistService {
        async fn join(&self, signup: &WaitlistSignup) -> Result<(), WaitlistError>;
    }
}

/// Waitlist service implementation
#[derive(Debug, Clone)]
pub struct WaitlistServiceImpl<N>
where
    N: Notifier,
{
    notifier: Arc<N>,
}

impl<N> WaitlistServiceImpl<N>
where
    N: Notifier,
{
    /// Create a new waitlist service
    pub fn new(notifier: Arc<N>) -> Self {
        Self { notifier }
    }
}

#[async_trait]
impl<N> WaitlistService for WaitlistServiceImpl<N>
where
    N: Notifier,
{
    async fn join(&self, signup: &WaitlistSignup) -> Result<(), WaitlistError> {
        if let Err(err) = self.notifier.notify(&signup.notification_text()).await {
            warn!(error = %err, "could not announce waitlist signup");

            return Err(err.into());
        }

        info!("waitlist signup announced");

        Ok(())
    }
}
