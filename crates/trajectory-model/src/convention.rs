//! Coordinate convention table for the schedule consumer.
//!
//! The signs and the rotation scale were calibrated once by eye against
//! Deforum's 3D animation mode. They are kept here as data so a different
//! consumer (or a future Deforum release) can be targeted from config
//! without touching the export math.

use serde::{Deserialize, Serialize};

/// Translation axis signs (x, y, z) for Deforum.
///
/// Deforum's camera space has +Y down and +Z into the screen.
pub const DEFORUM_TRANSLATION_SIGNS: [f64; 3] = [1.0, -1.0, -1.0];

/// Rotation axis signs (pitch, yaw, roll) for Deforum.
pub const DEFORUM_ROTATION_SIGNS: [f64; 3] = [-1.0, -1.0, 1.0];

/// Multiplier applied to rotation deltas after conversion to degrees.
pub const DEFORUM_ROTATION_SCALE: f64 = 0.1;

/// Sign and scale mapping from recorded deltas to schedule values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoordinateConvention {
    /// Sign applied to camera-local translation deltas (x, y, z).
    pub translation_signs: [f64; 3],

    /// Sign applied to rotation deltas (pitch, yaw, roll).
    pub rotation_signs: [f64; 3],

    /// Scale applied to rotation deltas in degrees.
    pub rotation_scale: f64,
}

impl CoordinateConvention {
    /// The calibrated Deforum convention.
    pub const fn deforum() -> Self {
        Self {
            translation_signs: DEFORUM_TRANSLATION_SIGNS,
            rotation_signs: DEFORUM_ROTATION_SIGNS,
            rotation_scale: DEFORUM_ROTATION_SCALE,
        }
    }

    /// Pass-through convention: no sign flips, rotation deltas in plain degrees.
    pub const fn identity() -> Self {
        Self {
            translation_signs: [1.0; 3],
            rotation_signs: [1.0; 3],
            rotation_scale: 1.0,
        }
    }

    /// Effective per-axis rotation multipliers (sign × scale).
    pub fn rotation_factors(&self) -> [f64; 3] {
        self.rotation_signs.map(|sign| sign * self.rotation_scale)
    }
}

impl Default for CoordinateConvention {
    fn default() -> Self {
        Self::deforum()
    }
}
