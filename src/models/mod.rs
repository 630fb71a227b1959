//! Wire and configuration models shared across the contacts repository.

#[cfg(feature = "server")]
pub mod config;
pub mod contact;
pub mod remote_error;
