//! Keyframe schedule strings.
//!
//! A schedule is a sparse `frame -> value` map written as
//! `0:(0), 4:(0.25), 8:(-1.5)`: ascending frames, `, ` between entries,
//! values in shortest round-trip decimal form.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::channels::Channel;

/// Sparse per-channel keyframe map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schedule {
    entries: BTreeMap<usize, f64>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value at `frame`, replacing any previous one.
    pub fn insert(&mut self, frame: usize, value: f64) {
        self.entries.insert(frame, value);
    }

    pub fn get(&self, frame: usize) -> Option<f64> {
        self.entries.get(&frame).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Frames carrying a value, ascending.
    pub fn frames(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.keys().copied()
    }

    /// `(frame, value)` pairs, ascending by frame.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.entries.iter().map(|(frame, value)| (*frame, *value))
    }

    /// Insert an explicit `0` for every frame in `start..=end` without a value.
    pub fn backfill_zeros(&mut self, start: usize, end: usize) {
        for frame in start..=end {
            self.entries.entry(frame).or_insert(0.0);
        }
    }
}

/// Format a value the way schedule consumers expect.
///
/// Negative zero is written as `0`.
pub fn format_value(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (frame, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{frame}:({})", format_value(value))?;
        }
        Ok(())
    }
}

/// Errors raised when reading a schedule string.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScheduleParseError {
    #[error("malformed schedule entry: {entry:?}")]
    MalformedEntry { entry: String },

    #[error("invalid frame number in entry: {entry:?}")]
    InvalidFrame { entry: String },

    #[error("invalid value in entry: {entry:?}")]
    InvalidValue { entry: String },
}

impl FromStr for Schedule {
    type Err = ScheduleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut schedule = Schedule::new();
        for entry in s.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let malformed = || ScheduleParseError::MalformedEntry {
                entry: entry.to_string(),
            };
            let (frame, value) = entry.split_once(':').ok_or_else(malformed)?;
            let value = value
                .trim()
                .strip_prefix('(')
                .and_then(|v| v.strip_suffix(')'))
                .ok_or_else(malformed)?;

            let frame: usize =
                frame
                    .trim()
                    .parse()
                    .map_err(|_| ScheduleParseError::InvalidFrame {
                        entry: entry.to_string(),
                    })?;
            let value: f64 =
                value
                    .trim()
                    .parse()
                    .map_err(|_| ScheduleParseError::InvalidValue {
                        entry: entry.to_string(),
                    })?;
            schedule.insert(frame, value);
        }
        Ok(schedule)
    }
}

/// The exported schedule document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeforumSchedules {
    pub translation_x: String,
    pub translation_y: String,
    pub translation_z: String,
    pub rotation_3d_x: String,
    pub rotation_3d_y: String,
    pub rotation_3d_z: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fov: Option<String>,
}

impl DeforumSchedules {
    /// Schedule string for `channel`, if present.
    pub fn get(&self, channel: Channel) -> Option<&str> {
        match channel {
            Channel::TranslationX => Some(&self.translation_x),
            Channel::TranslationY => Some(&self.translation_y),
            Channel::TranslationZ => Some(&self.translation_z),
            Channel::RotationX => Some(&self.rotation_3d_x),
            Channel::RotationY => Some(&self.rotation_3d_y),
            Channel::RotationZ => Some(&self.rotation_3d_z),
            Channel::Fov => self.fov.as_deref(),
        }
    }

    /// `(field name, schedule)` pairs in document order.
    pub fn fields(&self) -> Vec<(&'static str, &str)> {
        Channel::ALL
            .iter()
            .filter_map(|c| self.get(*c).map(|s| (c.schedule_name(), s)))
            .collect()
    }
}

/// Everything produced by one export request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportBundle {
    pub schedules: DeforumSchedules,
    pub json: String,
    pub pretty_text: String,
}
