//! camtrail Common Utilities
//!
//! Shared infrastructure for all camtrail crates:
//! - Error types and result aliases
//! - Fixed-timestep clock used by recording and playback
//! - Tracing/logging initialization
//! - Configuration loading

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;
