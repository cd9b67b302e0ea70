//! camtrail Processing Core
//!
//! Post-capture transforms over recorded channel arrays:
//! - **Smoothing:** Centered moving average, repeatable for N passes
//!
//! This crate is pure computation with no I/O and no platform dependencies.
//! All inputs are data; all outputs are data.

pub mod smoothing;

pub use smoothing::{moving_average, TrajectorySmoother};
