//! Outbound email: addresses, the normalized message and provider delivery.

pub mod credentials;
pub mod delivery;
pub mod email_addresses;
pub mod errors;
pub mod message;
