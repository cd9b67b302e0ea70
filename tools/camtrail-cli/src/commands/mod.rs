pub mod config;
pub mod simulate;
pub mod validate;

use camtrail_trajectory_model::ExportOptions;
use clap::Args;

/// Export option overrides shared by several subcommands.
#[derive(Args, Debug, Clone, Default)]
pub struct ExportArgs {
    /// First exported frame
    #[arg(long)]
    pub start: Option<usize>,

    /// Last exported frame (inclusive)
    #[arg(long)]
    pub end: Option<usize>,

    /// Frame step
    #[arg(long)]
    pub step: Option<usize>,

    /// Keyframe cadence (1 = every frame)
    #[arg(long)]
    pub cadence: Option<usize>,

    /// Master translate scale (0 = 1x, v>0 = v x, v<0 = 1/-v x)
    #[arg(long, allow_hyphen_values = true)]
    pub master_translate: Option<f64>,

    /// Master rotate scale (same mapping as translate)
    #[arg(long, allow_hyphen_values = true)]
    pub master_rotate: Option<f64>,

    /// Zero-fill frames without a keyframe (cadence 1 only)
    #[arg(long)]
    pub include_empty: bool,

    /// Also export an absolute fov schedule
    #[arg(long)]
    pub include_fov: bool,
}

impl ExportArgs {
    /// Overlay the command-line values onto `base`.
    pub fn apply(&self, base: ExportOptions) -> ExportOptions {
        ExportOptions {
            frame_start: self.start.unwrap_or(base.frame_start),
            frame_end: self.end.unwrap_or(base.frame_end),
            frame_step: self.step.unwrap_or(base.frame_step),
            cadence: self.cadence.unwrap_or(base.cadence),
            master_scale_translate: self.master_translate.unwrap_or(base.master_scale_translate),
            master_scale_rotate: self.master_rotate.unwrap_or(base.master_scale_rotate),
            include_empty_frames: base.include_empty_frames || self.include_empty,
            include_fov: base.include_fov || self.include_fov,
            ..base
        }
    }
}
