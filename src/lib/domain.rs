//! Domain types and ports

pub mod communication;
pub mod waitlist;
