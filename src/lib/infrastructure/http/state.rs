//! Application state module

use std::{fmt, path::PathBuf, sync::Arc};

use chrono::{DateTime, Utc};

use crate::domain::{communication::delivery::EmailRelay, waitlist::WaitlistService};

/// Application configuration
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Directory served under `/public`
    pub public_dir: PathBuf,
}

/// Global application state
#[derive(Clone)]
pub struct AppState<W: WaitlistService, R: EmailRelay> {
    /// The time the server started
    pub start_time: DateTime<Utc>,

    /// The application configuration
    pub config: AppConfig,

    /// Waitlist service
    pub waitlist: Arc<W>,

    /// Email relay
    pub relay: Arc<R>,
}

/// Implementation of the application state
impl<W, R> AppState<W, R>
where
    W: WaitlistService,
    R: EmailRelay,
{
    /// Create a new application state
    pub fn new(config: AppConfig, waitlist: W, relay: R) -> Self {
        Self {
            config,
            start_time: Utc::now(),
            waitlist: Arc::new(waitlist),
            relay: Arc::new(relay),
        }
    }
}

impl<W, R> fmt::Debug for AppState<W, R>
where
    W: WaitlistService,
    R: EmailRelay,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("start_time", &self.start_time)
            .field("config", &self.config)
            .field("waitlist", &"WaitlistService")
            .field("relay", &"EmailRelay")
            .finish()
    }
}
