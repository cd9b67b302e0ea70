//! camtrail Schedule Export
//!
//! Turns recorded channel arrays into Deforum keyframe schedules.
//!
//! # Pipeline
//!
//! ```text
//! ChannelArrays ──┐
//!                 ├── validate (option ranges)
//! ExportOptions ──┘         │
//!                           ├── keyframe selection (window, step, cadence)
//!                           │         │
//!                           │         ├── camera-local translation deltas
//!                           │         ├── rotation deltas in degrees
//!                           │         └── convention + master scales
//!                           ▼
//!                  DeforumSchedules ──► JSON / pretty text / file
//! ```

pub mod generate;
pub mod render;
pub mod validate;

use camtrail_common::error::{CamtrailError, CamtrailResult};
use camtrail_trajectory_model::{ChannelArrays, CoordinateConvention, ExportBundle, ExportOptions};

pub use generate::{generate_schedules, keyframe_frames};
pub use render::{generate_json, to_pretty_text, write_bundle, OutputFormat};
pub use validate::validate;

/// Validates options and produces a complete [`ExportBundle`].
#[derive(Debug, Clone, Default)]
pub struct DeforumExporter {
    convention: CoordinateConvention,
}

impl DeforumExporter {
    pub fn new(convention: CoordinateConvention) -> Self {
        Self { convention }
    }

    pub fn convention(&self) -> &CoordinateConvention {
        &self.convention
    }

    /// Default options for a recording of `total_frames`.
    pub fn default_options(total_frames: usize) -> ExportOptions {
        ExportOptions::for_frames(total_frames)
    }

    /// Export `channels` with `options`.
    ///
    /// Empty input is a [`CamtrailError::NoData`]; invalid options are
    /// reported together as [`CamtrailError::InvalidOptions`].
    pub fn export(
        &self,
        channels: &ChannelArrays,
        options: &ExportOptions,
    ) -> CamtrailResult<ExportBundle> {
        if channels.is_empty() {
            return Err(CamtrailError::NoData);
        }

        let violations = validate(options, channels.len());
        if !violations.is_empty() {
            tracing::warn!(count = violations.len(), "Export options rejected");
            return Err(CamtrailError::InvalidOptions { violations });
        }

        let schedules = generate_schedules(channels, options, &self.convention);
        let keyframes = keyframe_frames(options, channels.len()).len();
        tracing::info!(
            frames = channels.len(),
            keyframes,
            cadence = options.cadence,
            "Generated schedules"
        );

        Ok(ExportBundle {
            json: generate_json(&schedules)?,
            pretty_text: to_pretty_text(&schedules),
            schedules,
        })
    }
}
