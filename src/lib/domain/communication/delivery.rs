//! Delivering a message through third-party email providers.

mod outcome;
mod provider;
mod relay;

pub use outcome::SendOutcome;
pub use provider::{ConfiguredProvider, EmailProvider};
pub use relay::{send_with_failover, EmailRelay, FailoverRelay};
