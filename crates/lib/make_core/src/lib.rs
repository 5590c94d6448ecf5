//! # make_core
//!
//! Core domain logic for make-mcp: configuration, Make API models, the
//! [`client::MakeApi`] seam with its HTTP implementation, and error
//! normalization.

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod prompt;

pub use client::{MakeApi, MakeClient};
pub use config::{ConfigError, MakeConfig};
pub use error::MakeError;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
