//! Director: the single entry point a UI or render loop talks to.
//!
//! Owns the recorder, the playback driver, an optional pilot and the
//! schedule exporter, and enforces that recording and playback never run
//! at the same time. Everything is driven from [`Director::tick`] on the
//! caller's thread; nothing here blocks.

use camtrail_common::config::AppConfig;
use camtrail_common::error::{CamtrailError, CamtrailResult};
use camtrail_schedule_export::DeforumExporter;
use camtrail_trajectory_model::{
    CameraPose, ChannelArrays, ExportBundle, ExportOptions, SmoothingOptions,
};

use crate::pilot::{ControlSource, Pilot};
use crate::playback::{PlaybackDriver, PlaybackTick};
use crate::recorder::Recorder;

/// What the director is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectorMode {
    Idle,
    Recording,
    Playing,
}

/// Destination for copied schedule text.
pub trait ClipboardSink {
    fn write_text(&mut self, text: &str) -> CamtrailResult<()>;
}

/// In-memory clipboard for headless use.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
}

impl MemoryClipboard {
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl ClipboardSink for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> CamtrailResult<()> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}

/// Result of one [`Director::tick`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutcome {
    /// Pose to render next.
    pub pose: CameraPose,
    /// Samples appended by the recorder this tick.
    pub samples_recorded: usize,
    /// What the playback driver did this tick.
    pub playback: PlaybackTick,
}

/// Coordinates recording, smoothing, playback and export.
pub struct Director {
    recorder: Recorder,
    playback: PlaybackDriver,
    exporter: DeforumExporter,
    pilot: Option<Pilot>,
    controls: Option<Box<dyn ControlSource>>,
    camera: Option<CameraPose>,
    /// Independent copy of the last stopped (and possibly smoothed) arrays.
    snapshot: Option<ChannelArrays>,
}

impl Director {
    /// Build a director from the loaded configuration.
    pub fn new(config: &AppConfig) -> CamtrailResult<Self> {
        let recorder = Recorder::new(config.recording.fps)?;
        let playback = PlaybackDriver::new(recorder.timestep_secs())?;
        Ok(Self {
            recorder,
            playback,
            exporter: DeforumExporter::new(config.convention),
            pilot: None,
            controls: None,
            camera: None,
            snapshot: None,
        })
    }

    /// Fly the camera with `pilot`, fed by `source` on every [`tick`](Self::tick).
    pub fn attach_pilot(&mut self, mut pilot: Pilot, source: Box<dyn ControlSource>) {
        if let Some(pose) = self.camera {
            pilot.set_pose(pose);
        }
        tracing::info!(source = source.name(), "Pilot attached");
        self.pilot = Some(pilot);
        self.controls = Some(source);
    }

    /// The renderer has a camera; adopt its pose.
    pub fn on_camera_ready(&mut self, pose: CameraPose) {
        tracing::debug!(position = ?pose.position, fov = pose.fov_degrees, "Camera ready");
        if let Some(pilot) = self.pilot.as_mut() {
            pilot.set_pose(pose);
        }
        self.camera = Some(pose);
    }

    pub fn mode(&self) -> DirectorMode {
        if self.recorder.is_recording() {
            DirectorMode::Recording
        } else if self.playback.is_active() {
            DirectorMode::Playing
        } else {
            DirectorMode::Idle
        }
    }

    /// Per-frame tick with the pose produced by the attached pilot.
    ///
    /// Without a pilot the last known camera pose is held.
    pub fn tick(&mut self, delta_secs: f64) -> TickOutcome {
        let pose = match (self.pilot.as_mut(), self.controls.as_mut()) {
            (Some(pilot), Some(source)) => {
                let controls = source.poll(delta_secs);
                pilot.advance(&controls, delta_secs)
            }
            _ => self.camera.unwrap_or_default(),
        };
        self.tick_with_pose(pose, delta_secs)
    }

    /// Per-frame tick with a pose owned by the renderer.
    ///
    /// Order: record the pose, advance playback, then hand back the pose
    /// for the next render (the playback frame when one is presented).
    pub fn tick_with_pose(&mut self, pose: CameraPose, delta_secs: f64) -> TickOutcome {
        let samples_recorded = self.recorder.update(&pose, delta_secs);
        let playback = self.playback.update(delta_secs);

        let next = self.playback.camera_state().unwrap_or(pose);
        if let Some(pilot) = self.pilot.as_mut() {
            pilot.set_pose(next);
        }
        self.camera = Some(next);

        TickOutcome {
            pose: next,
            samples_recorded,
            playback,
        }
    }

    /// Arm the recorder. Rejected during playback or an active recording.
    pub fn start_recording(&mut self) -> CamtrailResult<()> {
        match self.mode() {
            DirectorMode::Playing => Err(CamtrailError::recording(
                "cannot start recording during playback",
            )),
            DirectorMode::Recording => {
                Err(CamtrailError::recording("a recording is already in progress"))
            }
            DirectorMode::Idle => {
                self.recorder.start();
                Ok(())
            }
        }
    }

    /// Stop recording and return the number of recorded frames.
    pub fn stop_recording(&mut self) -> CamtrailResult<usize> {
        if !self.recorder.is_recording() {
            return Err(CamtrailError::recording("no recording in progress"));
        }
        let frames = self.recorder.stop();
        self.snapshot = self.recorder.snapshot();
        Ok(frames)
    }

    /// Start replaying the last recording.
    ///
    /// Returns `Ok(false)` when there is nothing to play.
    pub fn start_playback(&mut self) -> CamtrailResult<bool> {
        if self.recorder.is_recording() {
            return Err(CamtrailError::playback(
                "cannot start playback while recording",
            ));
        }
        let Some(channels) = self.snapshot.as_ref() else {
            tracing::warn!("Playback requested with no recorded frames");
            return Ok(false);
        };

        self.playback
            .set_timestep(self.recorder.recorded_timestep_secs())?;
        match self.playback.start(channels) {
            Ok(()) => Ok(true),
            Err(e) => {
                tracing::debug!(error = %e, "Playback not started");
                Ok(false)
            }
        }
    }

    pub fn stop_playback(&mut self) {
        self.playback.stop();
    }

    pub fn pause_playback(&mut self) {
        self.playback.pause();
    }

    pub fn resume_playback(&mut self) {
        self.playback.resume();
    }

    /// Smooth the recorded arrays; see [`Recorder::apply_smoothing`].
    pub fn apply_smoothing(&mut self, options: &SmoothingOptions) -> CamtrailResult<()> {
        self.recorder.apply_smoothing(options)?;
        self.snapshot = self.recorder.snapshot();
        Ok(())
    }

    /// Restore the pre-smoothing arrays. Returns `false` without a baseline.
    pub fn revert_smoothing(&mut self) -> bool {
        let reverted = self.recorder.revert_smoothing();
        if reverted {
            self.snapshot = self.recorder.snapshot();
        }
        reverted
    }

    /// Export options covering the whole last recording.
    pub fn default_export_options(&self) -> ExportOptions {
        DeforumExporter::default_options(self.total_frames())
    }

    /// Generate schedules from the last stopped recording.
    ///
    /// Works while a new recording is armed; it never reads in-progress
    /// capture.
    pub fn export_schedules(&self, options: &ExportOptions) -> CamtrailResult<ExportBundle> {
        let channels = self.snapshot.as_ref().ok_or(CamtrailError::NoData)?;
        self.exporter.export(channels, options)
    }

    /// Put `text` on `sink`. Failures are logged and reported as `false`.
    pub fn copy_to_clipboard(&self, text: &str, sink: &mut dyn ClipboardSink) -> bool {
        match sink.write_text(text) {
            Ok(()) => {
                tracing::info!(bytes = text.len(), "Copied schedules to clipboard");
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Clipboard write failed");
                false
            }
        }
    }

    /// Change the sampling rate of the next recording.
    pub fn set_fps(&mut self, fps: f64) -> CamtrailResult<()> {
        self.recorder.set_fps(fps)
    }

    /// Frames in the last stopped recording.
    pub fn total_frames(&self) -> usize {
        self.snapshot.as_ref().map_or(0, ChannelArrays::len)
    }

    pub fn camera(&self) -> Option<CameraPose> {
        self.camera
    }

    pub fn recorder(&self) -> &Recorder {
        &self.recorder
    }

    pub fn playback(&self) -> &PlaybackDriver {
        &self.playback
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pilot::{ControlSegment, ControlState, PilotConfig, ScriptedControls};
    use camtrail_common::config::RecordingDefaults;
    use camtrail_trajectory_model::Channel;
    use glam::DVec3;

    const DT: f64 = 0.1;

    fn director() -> Director {
        let config = AppConfig {
            recording: RecordingDefaults { fps: 10.0 },
            ..AppConfig::default()
        };
        Director::new(&config).unwrap()
    }

    fn pose_x(x: f64) -> CameraPose {
        CameraPose::at(DVec3::new(x, 0.0, 0.0))
    }

    fn record_line(d: &mut Director, xs: &[f64]) {
        d.start_recording().unwrap();
        for x in xs {
            d.tick_with_pose(pose_x(*x), DT);
        }
        d.stop_recording().unwrap();
    }

    struct BrokenClipboard;

    impl ClipboardSink for BrokenClipboard {
        fn write_text(&mut self, _text: &str) -> CamtrailResult<()> {
            Err(CamtrailError::clipboard("no clipboard available"))
        }
    }

    #[test]
    fn test_record_then_export_line() {
        let mut d = director();
        record_line(&mut d, &[0.0, 0.1, 0.2]);
        assert_eq!(d.total_frames(), 3);

        let bundle = d.export_schedules(&d.default_export_options()).unwrap();
        assert_eq!(bundle.schedules.translation_x, "0:(0), 1:(0.1), 2:(0.1)");
    }

    #[test]
    fn test_modes_are_exclusive() {
        let mut d = director();
        record_line(&mut d, &[0.0, 1.0]);

        assert!(d.start_playback().unwrap());
        assert_eq!(d.mode(), DirectorMode::Playing);
        assert!(d.start_recording().is_err());

        d.stop_playback();
        d.start_recording().unwrap();
        assert_eq!(d.mode(), DirectorMode::Recording);
        assert!(d.start_playback().is_err());
        assert!(d.start_recording().is_err());
    }

    #[test]
    fn test_stop_without_recording_is_error() {
        let mut d = director();
        assert!(d.stop_recording().is_err());
    }

    #[test]
    fn test_playback_without_data_is_quiet() {
        let mut d = director();
        assert!(!d.start_playback().unwrap());
        assert_eq!(d.mode(), DirectorMode::Idle);
    }

    #[test]
    fn test_export_uses_last_stopped_recording_while_armed() {
        let mut d = director();
        record_line(&mut d, &[0.0, 0.1, 0.2]);
        d.start_recording().unwrap();
        d.tick_with_pose(pose_x(5.0), DT);

        let bundle = d.export_schedules(&ExportOptions::for_frames(3)).unwrap();
        assert_eq!(bundle.schedules.translation_x, "0:(0), 1:(0.1), 2:(0.1)");
    }

    #[test]
    fn test_export_without_recording_is_no_data() {
        let d = director();
        assert!(matches!(
            d.export_schedules(&ExportOptions::for_frames(0)),
            Err(CamtrailError::NoData)
        ));
    }

    #[test]
    fn test_playback_drives_the_camera() {
        let mut d = director();
        record_line(&mut d, &[0.0, 1.0, 2.0]);
        d.start_playback().unwrap();

        let held = pose_x(99.0);
        let first = d.tick_with_pose(held, DT);
        assert_eq!(first.playback, PlaybackTick::Advanced { frame: 0 });
        assert_eq!(first.pose.position.x, 0.0);

        let second = d.tick_with_pose(first.pose, DT);
        assert_eq!(second.pose.position.x, 1.0);
        assert_eq!(d.camera(), Some(second.pose));
    }

    #[test]
    fn test_playback_finishes_and_returns_to_idle() {
        let mut d = director();
        record_line(&mut d, &[0.0, 1.0]);
        d.start_playback().unwrap();

        let mut last = PlaybackTick::Idle;
        for _ in 0..3 {
            last = d.tick_with_pose(CameraPose::default(), DT).playback;
        }
        assert_eq!(last, PlaybackTick::Finished);
        assert_eq!(d.mode(), DirectorMode::Idle);
    }

    #[test]
    fn test_smoothing_updates_export_and_reverts() {
        let mut d = director();
        record_line(&mut d, &[10.0, 20.0, 30.0, 40.0]);
        let raw = d.export_schedules(&d.default_export_options()).unwrap();

        d.apply_smoothing(&SmoothingOptions {
            window: 3,
            iterations: 1,
            non_destructive: true,
        })
        .unwrap();
        let smoothed = d.export_schedules(&d.default_export_options()).unwrap();
        assert_ne!(raw.schedules.translation_x, smoothed.schedules.translation_x);

        assert!(d.revert_smoothing());
        let reverted = d.export_schedules(&d.default_export_options()).unwrap();
        assert_eq!(raw, reverted);
    }

    #[test]
    fn test_smoothing_during_recording_is_rejected() {
        let mut d = director();
        d.start_recording().unwrap();
        assert!(d.apply_smoothing(&SmoothingOptions::default()).is_err());
    }

    #[test]
    fn test_clipboard_success_and_failure() {
        let d = director();
        let mut memory = MemoryClipboard::default();
        assert!(d.copy_to_clipboard("0:(0)", &mut memory));
        assert_eq!(memory.contents(), Some("0:(0)"));
        assert!(!d.copy_to_clipboard("0:(0)", &mut BrokenClipboard));
    }

    #[test]
    fn test_pilot_flight_is_recorded() {
        let mut d = director();
        d.on_camera_ready(CameraPose::default());
        let script = ScriptedControls::new(vec![ControlSegment {
            duration_secs: 1.0,
            controls: ControlState {
                right: 1.0,
                ..ControlState::default()
            },
        }]);
        d.attach_pilot(
            Pilot::new(CameraPose::default(), PilotConfig::default()),
            Box::new(script),
        );

        d.start_recording().unwrap();
        for _ in 0..5 {
            d.tick(DT);
        }
        assert_eq!(d.stop_recording().unwrap(), 5);

        let xs = d.recorder().channels().unwrap().channel(Channel::TranslationX);
        assert!(xs.windows(2).all(|w| w[1] > w[0]), "{xs:?}");
    }

    #[test]
    fn test_tick_without_pilot_holds_camera() {
        let mut d = director();
        d.on_camera_ready(pose_x(3.0));
        let outcome = d.tick(DT);
        assert_eq!(outcome.pose, pose_x(3.0));
        assert_eq!(outcome.samples_recorded, 0);
        assert_eq!(outcome.playback, PlaybackTick::Idle);
    }
}
