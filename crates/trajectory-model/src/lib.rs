//! camtrail Trajectory Model
//!
//! Defines the core data contracts shared by capture, smoothing, and export:
//! - **Pose / Sample:** Camera state captured at one fixed timestep
//! - **Channels:** Seven index-aligned per-frame numeric arrays
//! - **Options:** Smoothing and export configuration
//! - **Convention:** Sign/scale calibration against the schedule consumer
//! - **Schedule:** The exported per-channel keyframe strings
//!
//! Positions are world units, rotations are Euler radians composed in
//! [`pose::EULER_ORDER`], and field of view is in degrees.

pub mod channels;
pub mod convention;
pub mod options;
pub mod pose;
pub mod schedule;

pub use channels::*;
pub use convention::*;
pub use options::*;
pub use pose::*;
pub use schedule::*;
