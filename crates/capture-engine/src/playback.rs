//! Playback of recorded trajectories.
//!
//! Replays channel arrays at the same fixed timestep they were recorded
//! at. The driver advances an internal counter once per elapsed step and
//! presents the frame it just advanced to, so the pose to render is always
//! one behind the counter.

use camtrail_common::clock::FixedStepClock;
use camtrail_common::error::{CamtrailError, CamtrailResult};
use camtrail_trajectory_model::{CameraPose, ChannelArrays};

/// Playback state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// Nothing is playing.
    Idle,
    /// Advancing one frame per elapsed timestep.
    Playing,
    /// Holding the current frame; time does not accumulate.
    Paused,
}

/// Outcome of a single [`PlaybackDriver::update`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackTick {
    /// Not playing (idle or paused).
    Idle,
    /// Less than one timestep has accumulated.
    Waiting,
    /// Advanced; `frame` is the frame to render now.
    Advanced { frame: usize },
    /// Ran past the last frame and stopped.
    Finished,
}

/// Replays recorded channel arrays at a fixed rate.
#[derive(Debug)]
pub struct PlaybackDriver {
    clock: FixedStepClock,
    state: PlaybackState,
    channels: Option<ChannelArrays>,
    /// Number of frames advanced past; the frame on screen is `counter - 1`.
    counter: usize,
}

impl PlaybackDriver {
    /// Create a driver stepping at `timestep_secs`.
    pub fn new(timestep_secs: f64) -> CamtrailResult<Self> {
        Ok(Self {
            clock: FixedStepClock::from_timestep(timestep_secs)?,
            state: PlaybackState::Idle,
            channels: None,
            counter: 0,
        })
    }

    /// Change the playback timestep (takes effect immediately).
    pub fn set_timestep(&mut self, timestep_secs: f64) -> CamtrailResult<()> {
        self.clock = FixedStepClock::from_timestep(timestep_secs)?;
        Ok(())
    }

    /// Start playing a copy of `channels` from frame 0.
    ///
    /// Rejected when there are no frames to play.
    pub fn start(&mut self, channels: &ChannelArrays) -> CamtrailResult<()> {
        if channels.is_empty() {
            tracing::warn!("Playback requested with no recorded frames");
            return Err(CamtrailError::playback("no recorded frames to play"));
        }

        self.channels = Some(channels.clone());
        self.counter = 0;
        self.clock.reset();
        self.state = PlaybackState::Playing;
        tracing::info!(frames = channels.len(), "Playback started");
        Ok(())
    }

    /// Stop playback and rewind.
    pub fn stop(&mut self) {
        if self.state != PlaybackState::Idle {
            tracing::info!(frame = ?self.current_frame(), "Playback stopped");
        }
        self.state = PlaybackState::Idle;
        self.counter = 0;
        self.clock.reset();
    }

    /// Hold the current frame.
    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Paused;
        }
    }

    /// Continue from a pause.
    pub fn resume(&mut self) {
        if self.state == PlaybackState::Paused {
            self.state = PlaybackState::Playing;
        }
    }

    /// Feed one render tick.
    pub fn update(&mut self, delta_secs: f64) -> PlaybackTick {
        if self.state != PlaybackState::Playing {
            return PlaybackTick::Idle;
        }

        let steps = self.clock.advance(delta_secs);
        if steps == 0 {
            return PlaybackTick::Waiting;
        }

        let total = self.total_frames();
        for _ in 0..steps {
            if self.counter >= total {
                tracing::info!(frames = total, "Playback finished");
                self.stop();
                return PlaybackTick::Finished;
            }
            self.counter += 1;
        }

        PlaybackTick::Advanced {
            frame: self.counter - 1,
        }
    }

    /// Jump to `frame`, clamped to the recording. Does not change state.
    pub fn seek(&mut self, frame: usize) {
        let total = self.total_frames();
        if total == 0 {
            return;
        }
        self.counter = frame.min(total - 1) + 1;
    }

    /// Frame currently presented, if playing and inside the recording.
    pub fn current_frame(&self) -> Option<usize> {
        if self.state == PlaybackState::Idle {
            return None;
        }
        self.counter
            .checked_sub(1)
            .filter(|frame| *frame < self.total_frames())
    }

    /// Camera pose for the presented frame.
    pub fn camera_state(&self) -> Option<CameraPose> {
        let frame = self.current_frame()?;
        self.channels.as_ref()?.pose_at(frame)
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state != PlaybackState::Idle
    }

    /// Number of frames loaded for playback.
    pub fn total_frames(&self) -> usize {
        self.channels.as_ref().map_or(0, ChannelArrays::len)
    }
}
