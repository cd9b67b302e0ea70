//! Clock and timing utilities for fixed-rate sampling.
//!
//! Recording and playback both run off the host's render loop, which
//! delivers a variable frame-to-frame delta. This module converts those
//! deltas into a deterministic number of fixed-size steps:
//! - `FixedStepClock` accumulates elapsed time and yields whole steps
//! - `SessionClock` anchors a session to wall-clock time for logging

use std::time::Instant;

use crate::error::{CamtrailError, CamtrailResult};

/// Default capture rate when none is configured.
pub const DEFAULT_FPS: f64 = 30.0;

/// Accumulator that converts variable frame deltas into fixed timesteps.
///
/// Large deltas produce several steps in one call (catch-up); deltas
/// smaller than the timestep accumulate until a full step has elapsed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedStepClock {
    timestep_secs: f64,
    accumulator_secs: f64,
}

impl FixedStepClock {
    /// Create a clock ticking at `fps` steps per second.
    pub fn from_fps(fps: f64) -> CamtrailResult<Self> {
        if !fps.is_finite() || fps <= 0.0 {
            return Err(CamtrailError::config(format!(
                "frame rate must be a positive number, got {fps}"
            )));
        }
        Self::from_timestep(1.0 / fps)
    }

    /// Create a clock with an explicit timestep in seconds.
    pub fn from_timestep(timestep_secs: f64) -> CamtrailResult<Self> {
        if !timestep_secs.is_finite() || timestep_secs <= 0.0 {
            return Err(CamtrailError::config(format!(
                "timestep must be a positive number of seconds, got {timestep_secs}"
            )));
        }
        Ok(Self {
            timestep_secs,
            accumulator_secs: 0.0,
        })
    }

    /// Fixed step size in seconds.
    pub fn timestep_secs(&self) -> f64 {
        self.timestep_secs
    }

    /// Steps per second.
    pub fn fps(&self) -> f64 {
        1.0 / self.timestep_secs
    }

    /// Time accumulated towards the next step.
    pub fn pending_secs(&self) -> f64 {
        self.accumulator_secs
    }

    /// Drop any partially accumulated time.
    pub fn reset(&mut self) {
        self.accumulator_secs = 0.0;
    }

    /// Feed an elapsed delta and return how many whole steps completed.
    ///
    /// Negative or non-finite deltas are ignored.
    pub fn advance(&mut self, delta_secs: f64) -> u32 {
        if !delta_secs.is_finite() || delta_secs <= 0.0 {
            return 0;
        }

        self.accumulator_secs += delta_secs;
        let mut steps = 0;
        while self.accumulator_secs >= self.timestep_secs {
            self.accumulator_secs -= self.timestep_secs;
            steps += 1;
        }
        steps
    }
}

impl Default for FixedStepClock {
    fn default() -> Self {
        Self {
            timestep_secs: 1.0 / DEFAULT_FPS,
            accumulator_secs: 0.0,
        }
    }
}

/// Wall-clock anchor for a recording or playback session.
#[derive(Debug, Clone)]
pub struct SessionClock {
    /// The instant the session started.
    epoch: Instant,

    /// Wall-clock time at epoch (RFC 3339 string).
    epoch_wall: String,
}

impl SessionClock {
    /// Create a session clock anchored to now.
    pub fn start() -> Self {
        Self {
            epoch: Instant::now(),
            epoch_wall: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Real seconds elapsed since the session started.
    pub fn elapsed_secs(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64()
    }

    /// Wall-clock time at session start.
    pub fn epoch_wall(&self) -> &str {
        &self.epoch_wall
    }
}
