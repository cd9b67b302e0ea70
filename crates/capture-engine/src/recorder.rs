//! Fixed-timestep trajectory recorder.
//!
//! The recorder is fed once per render tick with the current camera pose
//! and the real elapsed time. It emits exactly one sample per elapsed fixed
//! timestep, so the recorded rate does not depend on the host frame rate.
//! On stop the samples are split into channel arrays, which smoothing then
//! replaces wholesale and export reads.

use camtrail_common::clock::{FixedStepClock, SessionClock};
use camtrail_common::error::{CamtrailError, CamtrailResult};
use camtrail_processing_core::TrajectorySmoother;
use camtrail_trajectory_model::{CameraPose, ChannelArrays, Sample, SmoothingOptions};

/// Records camera poses at a fixed rate and owns the derived channel arrays.
#[derive(Debug, Default)]
pub struct Recorder {
    /// Timestep used by the next recording.
    configured: FixedStepClock,
    /// Clock of the recording in progress (or the last one).
    clock: FixedStepClock,
    armed: bool,
    frame: u32,
    samples: Vec<Sample>,
    channels: Option<ChannelArrays>,
    baseline: Option<ChannelArrays>,
    session: Option<SessionClock>,
}

impl Recorder {
    /// Create a recorder sampling at `fps` frames per second.
    pub fn new(fps: f64) -> CamtrailResult<Self> {
        let clock = FixedStepClock::from_fps(fps)?;
        Ok(Self {
            configured: clock,
            clock,
            ..Self::default()
        })
    }

    /// Clear previous data and arm capture.
    pub fn start(&mut self) {
        self.samples.clear();
        self.channels = None;
        self.baseline = None;
        self.frame = 0;
        self.clock = self.configured;
        self.clock.reset();
        self.armed = true;

        let session = SessionClock::start();
        tracing::info!(
            fps = self.clock.fps(),
            started_at = %session.epoch_wall(),
            "Recording started"
        );
        self.session = Some(session);
    }

    /// Feed one render tick. Returns how many samples were appended.
    ///
    /// Every sample emitted by one call carries `pose`; poses are not
    /// interpolated across catch-up steps. Does nothing while disarmed.
    pub fn update(&mut self, pose: &CameraPose, delta_secs: f64) -> usize {
        if !self.armed {
            return 0;
        }

        let steps = self.clock.advance(delta_secs);
        for _ in 0..steps {
            self.samples
                .push(Sample::new(self.frame, self.clock.timestep_secs(), *pose));
            self.frame += 1;
        }
        steps as usize
    }

    /// Disarm capture and derive channel arrays from the samples.
    ///
    /// Returns the number of recorded frames. With no samples the channel
    /// arrays stay absent.
    pub fn stop(&mut self) -> usize {
        if !self.armed {
            return self.total_frames();
        }
        self.armed = false;

        if self.samples.is_empty() {
            self.channels = None;
            self.baseline = None;
        } else {
            let channels = ChannelArrays::from_samples(&self.samples);
            self.baseline = Some(channels.clone());
            self.channels = Some(channels);
        }

        let real_secs = self
            .session
            .take()
            .map(|s| s.elapsed_secs())
            .unwrap_or_default();
        tracing::info!(
            frames = self.samples.len(),
            recorded_secs = self.samples.len() as f64 * self.clock.timestep_secs(),
            real_secs,
            "Recording stopped"
        );
        self.total_frames()
    }

    /// Change the sampling rate for subsequent recordings.
    ///
    /// A recording already in progress keeps its rate; existing data is
    /// never resampled.
    pub fn set_fps(&mut self, fps: f64) -> CamtrailResult<()> {
        self.configured = FixedStepClock::from_fps(fps)?;
        Ok(())
    }

    /// Change the fixed timestep (seconds) for subsequent recordings.
    pub fn set_timestep(&mut self, timestep_secs: f64) -> CamtrailResult<()> {
        self.configured = FixedStepClock::from_timestep(timestep_secs)?;
        Ok(())
    }

    /// Timestep the next recording will use.
    pub fn timestep_secs(&self) -> f64 {
        self.configured.timestep_secs()
    }

    /// Timestep of the current or most recent recording.
    pub fn recorded_timestep_secs(&self) -> f64 {
        self.clock.timestep_secs()
    }

    /// Smooth the channel arrays in place.
    ///
    /// With `non_destructive` set and no baseline held, the current arrays
    /// become the baseline first. A destructive pass leaves any baseline in
    /// place, so revert still restores the arrays captured by [`stop`].
    ///
    /// [`stop`]: Recorder::stop
    pub fn apply_smoothing(&mut self, options: &SmoothingOptions) -> CamtrailResult<()> {
        if self.armed {
            return Err(CamtrailError::smoothing(
                "cannot smooth while a recording is in progress",
            ));
        }
        let Some(current) = self.channels.as_ref() else {
            return Err(CamtrailError::NoData);
        };
        if options.iterations == 0 {
            return Err(CamtrailError::smoothing("iterations must be at least 1"));
        }

        if options.non_destructive && self.baseline.is_none() {
            self.baseline = Some(current.clone());
        }

        let smoothed = TrajectorySmoother::from_options(options).smooth(current);
        self.channels = Some(smoothed);

        tracing::info!(
            window = options.window,
            iterations = options.iterations,
            non_destructive = options.non_destructive,
            "Applied smoothing"
        );
        Ok(())
    }

    /// Restore the arrays to the baseline. Returns `false` without one.
    pub fn revert_smoothing(&mut self) -> bool {
        match &self.baseline {
            Some(baseline) => {
                self.channels = Some(baseline.clone());
                tracing::info!("Reverted smoothing");
                true
            }
            None => {
                tracing::debug!("No smoothing baseline to revert to");
                false
            }
        }
    }

    /// Samples of the current or most recent recording.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Current channel arrays, `None` until a non-empty recording stopped.
    pub fn channels(&self) -> Option<&ChannelArrays> {
        self.channels.as_ref()
    }

    /// Independent copy of the current channel arrays.
    pub fn snapshot(&self) -> Option<ChannelArrays> {
        self.channels.clone()
    }

    /// Number of frames in the derived channel arrays.
    pub fn total_frames(&self) -> usize {
        self.channels.as_ref().map_or(0, ChannelArrays::len)
    }

    /// Number of samples captured so far (including an active recording).
    pub fn captured_samples(&self) -> usize {
        self.samples.len()
    }

    pub fn is_recording(&self) -> bool {
        self.armed
    }

    pub fn has_baseline(&self) -> bool {
        self.baseline.is_some()
    }
}
