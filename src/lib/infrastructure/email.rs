//! Transactional email providers

pub mod config;
pub mod providers;
