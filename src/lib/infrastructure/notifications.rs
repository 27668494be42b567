//! Chat notification channels

pub mod telegram;
