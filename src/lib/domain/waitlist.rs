//! Waitlist signups and the channel they are announced on.

mod notifier;
mod service;
mod signup;

pub mod errors;

pub use notifier::Notifier;
pub use service::{WaitlistService, WaitlistServiceImpl};
pub use signup::WaitlistSignup;
