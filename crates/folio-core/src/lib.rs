//! Configuration loading and shared primitives.

pub mod config;
pub mod secret;

pub use config::Config;
pub use secret::Secret;
