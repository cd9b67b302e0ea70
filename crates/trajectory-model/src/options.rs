//! Smoothing and export configuration.

use serde::{Deserialize, Serialize};

/// Moving-average smoothing configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingOptions {
    /// Centered window size in frames. `1` leaves the data unchanged.
    pub window: usize,

    /// Number of passes; each pass smooths the previous pass's output.
    pub iterations: u32,

    /// Snapshot the current arrays before the first pass so it can be reverted.
    pub non_destructive: bool,
}

impl Default for SmoothingOptions {
    fn default() -> Self {
        Self {
            window: 5,
            iterations: 1,
            non_destructive: true,
        }
    }
}

/// Options controlling schedule generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// First frame of the export window (inclusive).
    pub frame_start: usize,

    /// Last frame of the export window (inclusive, clamped to the recording).
    pub frame_end: usize,

    /// Stride between visited frames.
    pub frame_step: usize,

    /// Translation scale per camera-local axis.
    pub scale_x: f64,
    pub scale_y: f64,
    pub scale_z: f64,

    /// Zero-fill frames without a value. Only honoured when `cadence <= 1`.
    pub include_empty_frames: bool,

    /// Keyframe stride: only multiples of this are exported. `1` = every frame.
    pub cadence: usize,

    /// Master translation scale, see [`master_scale_factor`].
    pub master_scale_translate: f64,

    /// Master rotation scale, see [`master_scale_factor`].
    pub master_scale_rotate: f64,

    /// Also emit an absolute field-of-view schedule.
    pub include_fov: bool,
}

impl ExportOptions {
    /// Options covering every frame of a recording with `total_frames` frames.
    pub fn for_frames(total_frames: usize) -> Self {
        Self {
            frame_start: 0,
            frame_end: total_frames.saturating_sub(1),
            frame_step: 1,
            scale_x: 1.0,
            scale_y: 1.0,
            scale_z: 1.0,
            include_empty_frames: false,
            cadence: 1,
            master_scale_translate: 1.0,
            master_scale_rotate: 1.0,
            include_fov: false,
        }
    }

    /// Inclusive `(start, end)` window after clamping to the recording,
    /// or `None` when nothing falls inside it.
    pub fn frame_window(&self, total_frames: usize) -> Option<(usize, usize)> {
        let last = total_frames.checked_sub(1)?;
        let end = self.frame_end.min(last);
        (self.frame_start <= end).then_some((self.frame_start, end))
    }

    /// Per-axis translation scale as an array.
    pub fn axis_scale(&self) -> [f64; 3] {
        [self.scale_x, self.scale_y, self.scale_z]
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self::for_frames(0)
    }
}

/// Map a signed master-scale setting to a multiplier.
///
/// `0` means unscaled, a positive `v` multiplies by `v`, and a negative
/// `v` divides by `-v` (so `-4` gives `0.25`).
pub fn master_scale_factor(value: f64) -> f64 {
    if value > 0.0 {
        value
    } else if value < 0.0 {
        1.0 / -value
    } else {
        1.0
    }
}
