//! # tweetscore common library
//!
//! Shared code for the tweetscore workspace:
//! - Error and result types
//! - TOML configuration loading
//! - Tracing subscriber initialization
//! - Pipeline events and the broadcast event bus

pub mod config;
pub mod error;
pub mod events;
pub mod logging;

pub use error::{Error, Result};
pub use events::{EventBus, PipelineEvent};
