//! Free-flight camera pilot.
//!
//! Input devices are not read here. A [`ControlSource`] is polled once per
//! tick for the current control state, and the pilot integrates it into a
//! camera pose with plain Euler steps. Movement is relative to the camera's
//! current facing.

use camtrail_trajectory_model::CameraPose;
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Pitch limit, just short of straight up/down.
const MAX_PITCH_RADIANS: f64 = 89.0 * std::f64::consts::PI / 180.0;

/// Field-of-view limits in degrees.
const MIN_FOV_DEGREES: f64 = 10.0;
const MAX_FOV_DEGREES: f64 = 120.0;

/// Snapshot of pilot controls. Axes are in `[-1.0, 1.0]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlState {
    /// Forward (+) / backward (-).
    pub forward: f64,
    /// Strafe right (+) / left (-).
    pub right: f64,
    /// Rise (+) / sink (-).
    pub up: f64,
    /// Look up (+) / down (-).
    pub pitch: f64,
    /// Turn left (+) / right (-).
    pub yaw: f64,
    /// Roll counter-clockwise (+) / clockwise (-).
    pub roll: f64,
    /// Widen (+) / narrow (-) the field of view.
    pub zoom: f64,
    /// Multiply movement speed by the boost factor.
    pub boost: bool,
}

impl ControlState {
    fn clamped(&self) -> Self {
        let c = |v: f64| if v.is_finite() { v.clamp(-1.0, 1.0) } else { 0.0 };
        Self {
            forward: c(self.forward),
            right: c(self.right),
            up: c(self.up),
            pitch: c(self.pitch),
            yaw: c(self.yaw),
            roll: c(self.roll),
            zoom: c(self.zoom),
            boost: self.boost,
        }
    }
}

/// Something that can be polled for the current control state.
pub trait ControlSource {
    /// Controls for the tick that is `delta_secs` long.
    fn poll(&mut self, delta_secs: f64) -> ControlState;

    /// Source name for logging.
    fn name(&self) -> &str;
}

/// One timed entry of a scripted flight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlSegment {
    pub duration_secs: f64,
    pub controls: ControlState,
}

/// Replays a fixed list of control segments; idle afterwards.
#[derive(Debug, Clone, Default)]
pub struct ScriptedControls {
    segments: Vec<ControlSegment>,
    elapsed_secs: f64,
}

impl ScriptedControls {
    pub fn new(segments: Vec<ControlSegment>) -> Self {
        Self {
            segments,
            elapsed_secs: 0.0,
        }
    }

    /// Total scripted time in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.segments.iter().map(|s| s.duration_secs.max(0.0)).sum()
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed_secs >= self.duration_secs()
    }

    fn controls_at(&self, t: f64) -> ControlState {
        let mut start = 0.0;
        for segment in &self.segments {
            let end = start + segment.duration_secs.max(0.0);
            if t < end {
                return segment.controls;
            }
            start = end;
        }
        ControlState::default()
    }
}

impl ControlSource for ScriptedControls {
    fn poll(&mut self, delta_secs: f64) -> ControlState {
        let controls = self.controls_at(self.elapsed_secs);
        if delta_secs.is_finite() && delta_secs > 0.0 {
            self.elapsed_secs += delta_secs;
        }
        controls
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Pilot tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PilotConfig {
    /// Movement speed in world units per second.
    pub move_speed: f64,
    /// Speed multiplier while boosting.
    pub boost_multiplier: f64,
    /// Turn rate in radians per second at full deflection.
    pub look_speed: f64,
    /// Zoom rate in degrees per second at full deflection.
    pub zoom_speed: f64,
}

impl Default for PilotConfig {
    fn default() -> Self {
        Self {
            move_speed: 2.0,
            boost_multiplier: 3.0,
            look_speed: 1.2,
            zoom_speed: 20.0,
        }
    }
}

/// Integrates controls into a camera pose.
#[derive(Debug, Clone)]
pub struct Pilot {
    pose: CameraPose,
    config: PilotConfig,
}

impl Pilot {
    pub fn new(pose: CameraPose, config: PilotConfig) -> Self {
        Self { pose, config }
    }

    pub fn pose(&self) -> CameraPose {
        self.pose
    }

    /// Replace the pose, e.g. when the renderer hands over a new camera.
    pub fn set_pose(&mut self, pose: CameraPose) {
        self.pose = pose;
    }

    /// Advance by one tick and return the new pose.
    pub fn advance(&mut self, controls: &ControlState, delta_secs: f64) -> CameraPose {
        if !delta_secs.is_finite() || delta_secs <= 0.0 {
            return self.pose;
        }
        let controls = controls.clamped();

        let look = self.config.look_speed * delta_secs;
        let rotation = &mut self.pose.rotation;
        rotation.x = (rotation.x + controls.pitch * look).clamp(-MAX_PITCH_RADIANS, MAX_PITCH_RADIANS);
        rotation.y += controls.yaw * look;
        rotation.z += controls.roll * look;

        self.pose.fov_degrees = (self.pose.fov_degrees
            + controls.zoom * self.config.zoom_speed * delta_secs)
            .clamp(MIN_FOV_DEGREES, MAX_FOV_DEGREES);

        let local = DVec3::new(controls.right, controls.up, -controls.forward);
        if local != DVec3::ZERO {
            let mut speed = self.config.move_speed;
            if controls.boost {
                speed *= self.config.boost_multiplier;
            }
            let direction = self.pose.orientation() * local.clamp_length_max(1.0);
            self.pose.position += direction * speed * delta_secs;
        }

        self.pose
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn approx(a: DVec3, b: DVec3) -> bool {
        (a - b).length() < 1e-9
    }

    #[test]
    fn test_forward_moves_along_facing() {
        let mut pilot = Pilot::new(CameraPose::default(), PilotConfig::default());
        let controls = ControlState {
            forward: 1.0,
            ..Default::default()
        };
        let pose = pilot.advance(&controls, 0.5);
        assert!(approx(pose.position, DVec3::new(0.0, 0.0, -1.0)));
    }

    #[test]
    fn test_forward_follows_yaw() {
        let start = CameraPose::new(DVec3::ZERO, DVec3::new(0.0, FRAC_PI_2, 0.0), 60.0);
        let mut pilot = Pilot::new(start, PilotConfig::default());
        let controls = ControlState {
            forward: 1.0,
            ..Default::default()
        };
        let pose = pilot.advance(&controls, 1.0);
        assert!(approx(pose.position, DVec3::new(-2.0, 0.0, 0.0)));
    }

    #[test]
    fn test_boost_and_diagonal_speed() {
        let mut pilot = Pilot::new(CameraPose::default(), PilotConfig::default());
        let controls = ControlState {
            forward: 1.0,
            right: 1.0,
            boost: true,
            ..Default::default()
        };
        let pose = pilot.advance(&controls, 1.0);
        assert!((pose.position.length() - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_pitch_and_fov_are_clamped() {
        let mut pilot = Pilot::new(CameraPose::default(), PilotConfig::default());
        let controls = ControlState {
            pitch: 1.0,
            zoom: 1.0,
            ..Default::default()
        };
        let pose = pilot.advance(&controls, 100.0);
        assert!((pose.rotation.x - MAX_PITCH_RADIANS).abs() < 1e-12);
        assert_eq!(pose.fov_degrees, MAX_FOV_DEGREES);
    }

    #[test]
    fn test_out_of_range_controls_are_clamped() {
        let mut pilot = Pilot::new(CameraPose::default(), PilotConfig::default());
        let controls = ControlState {
            up: 50.0,
            yaw: f64::NAN,
            ..Default::default()
        };
        let pose = pilot.advance(&controls, 1.0);
        assert!(approx(pose.position, DVec3::new(0.0, 2.0, 0.0)));
        assert_eq!(pose.rotation.y, 0.0);
    }

    #[test]
    fn test_scripted_controls_follow_segments() {
        let mut script = ScriptedControls::new(vec![
            ControlSegment {
                duration_secs: 1.0,
                controls: ControlState {
                    forward: 1.0,
                    ..Default::default()
                },
            },
            ControlSegment {
                duration_secs: 1.0,
                controls: ControlState {
                    yaw: 1.0,
                    ..Default::default()
                },
            },
        ]);

        assert_eq!(script.poll(0.5).forward, 1.0);
        assert_eq!(script.poll(0.6).forward, 1.0);
        assert_eq!(script.poll(0.5).yaw, 1.0);
        assert!(!script.is_finished());
        assert_eq!(script.poll(0.5).yaw, 1.0);
        assert!(script.is_finished());
        assert_eq!(script.poll(0.1), ControlState::default());
    }
}
