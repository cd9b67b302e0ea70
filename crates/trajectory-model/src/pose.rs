//! Camera pose and captured sample types.

use glam::{DQuat, DVec3, EulerRot};
use serde::{Deserialize, Serialize};

/// Rotation composition order shared by capture and export.
///
/// Yaw about Y, then pitch about X, then roll about Z.
pub const EULER_ORDER: EulerRot = EulerRot::YXZ;

/// Default vertical field of view in degrees.
pub const DEFAULT_FOV_DEGREES: f64 = 75.0;

/// Camera state at a single instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    /// World-space position.
    pub position: DVec3,

    /// Euler angles in radians: `x` = pitch, `y` = yaw, `z` = roll.
    pub rotation: DVec3,

    /// Vertical field of view in degrees.
    pub fov_degrees: f64,
}

impl CameraPose {
    pub fn new(position: DVec3, rotation: DVec3, fov_degrees: f64) -> Self {
        Self {
            position,
            rotation,
            fov_degrees,
        }
    }

    /// Pose at `position` with no rotation and the default field of view.
    pub fn at(position: DVec3) -> Self {
        Self::new(position, DVec3::ZERO, DEFAULT_FOV_DEGREES)
    }

    /// Orientation quaternion built from the Euler angles in [`EULER_ORDER`].
    pub fn orientation(&self) -> DQuat {
        DQuat::from_euler(EULER_ORDER, self.rotation.y, self.rotation.x, self.rotation.z)
    }

    /// Camera-forward direction (`-Z` in camera space).
    pub fn forward(&self) -> DVec3 {
        self.orientation() * DVec3::NEG_Z
    }

    /// Camera-right direction (`+X` in camera space).
    pub fn right(&self) -> DVec3 {
        self.orientation() * DVec3::X
    }

    /// Camera-up direction (`+Y` in camera space).
    pub fn up(&self) -> DVec3 {
        self.orientation() * DVec3::Y
    }

    /// Express a world-space displacement in this pose's local frame.
    pub fn to_local(&self, world_delta: DVec3) -> DVec3 {
        self.orientation().inverse() * world_delta
    }
}

impl Default for CameraPose {
    fn default() -> Self {
        Self::at(DVec3::ZERO)
    }
}

/// One captured instant of a recording.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Zero-based frame index.
    pub frame: u32,

    /// Seconds since recording start (`frame * timestep`).
    pub time_secs: f64,

    /// Camera state at this frame.
    pub pose: CameraPose,
}

impl Sample {
    pub fn new(frame: u32, timestep_secs: f64, pose: CameraPose) -> Self {
        Self {
            frame,
            time_secs: frame as f64 * timestep_secs,
            pose,
        }
    }
}
