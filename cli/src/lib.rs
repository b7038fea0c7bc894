//! Library entry point for pubnub-cli components.
//!
//! Exposes configuration, error and output helpers so they can be tested
//! without going through the binary entry point.

pub mod config;
pub mod error;
pub mod logging;
pub mod output;

pub use config::{CLIConfiguration, KeyOverrides};
pub use error::{CLIError, Result};
