//! Adapters for the outside world: HTTP server, outbound calls, providers

pub mod email;
pub mod http;
pub mod notifications;
pub mod outbound;
