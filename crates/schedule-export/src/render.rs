//! Rendering schedule documents as JSON or plain text, and writing them out.

use std::path::{Path, PathBuf};

use camtrail_common::error::{CamtrailError, CamtrailResult};
use camtrail_trajectory_model::{DeforumSchedules, ExportBundle};
use serde::{Deserialize, Serialize};

/// Serialize the schedule document as pretty-printed JSON.
pub fn generate_json(schedules: &DeforumSchedules) -> CamtrailResult<String> {
    Ok(serde_json::to_string_pretty(schedules)?)
}

/// One `name: schedule` line per channel.
pub fn to_pretty_text(schedules: &DeforumSchedules) -> String {
    schedules
        .fields()
        .into_iter()
        .map(|(name, schedule)| format!("{name}: {schedule}\n"))
        .collect()
}

/// On-disk format for a saved export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

impl OutputFormat {
    /// Guess the format from a file extension (`.txt` → text, else JSON).
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("txt") => Self::Text,
            _ => Self::Json,
        }
    }

    /// The rendered content of `bundle` in this format.
    pub fn select<'a>(&self, bundle: &'a ExportBundle) -> &'a str {
        match self {
            Self::Json => &bundle.json,
            Self::Text => &bundle.pretty_text,
        }
    }
}

/// Write an export to `path`, creating parent directories as needed.
pub fn write_bundle(
    path: &Path,
    bundle: &ExportBundle,
    format: OutputFormat,
) -> CamtrailResult<PathBuf> {
    if path.is_dir() {
        return Err(CamtrailError::export(format!(
            "output path {} is a directory",
            path.display()
        )));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, format.select(bundle))?;
    tracing::info!(path = %path.display(), ?format, "Wrote schedules");
    Ok(path.to_path_buf())
}
