//! Per-channel numeric arrays derived from a recording.
//!
//! A recording of N frames becomes seven parallel arrays of length N.
//! Smoothing replaces whole arrays; export only reads them.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::pose::{CameraPose, Sample};

/// One of the seven recorded channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    TranslationX,
    TranslationY,
    TranslationZ,
    RotationX,
    RotationY,
    RotationZ,
    Fov,
}

impl Channel {
    /// Every channel, in storage order.
    pub const ALL: [Channel; 7] = [
        Channel::TranslationX,
        Channel::TranslationY,
        Channel::TranslationZ,
        Channel::RotationX,
        Channel::RotationY,
        Channel::RotationZ,
        Channel::Fov,
    ];

    /// The six motion channels exported as deltas.
    pub const MOTION: [Channel; 6] = [
        Channel::TranslationX,
        Channel::TranslationY,
        Channel::TranslationZ,
        Channel::RotationX,
        Channel::RotationY,
        Channel::RotationZ,
    ];

    /// Field name used in exported schedule documents.
    pub fn schedule_name(self) -> &'static str {
        match self {
            Channel::TranslationX => "translation_x",
            Channel::TranslationY => "translation_y",
            Channel::TranslationZ => "translation_z",
            Channel::RotationX => "rotation_3d_x",
            Channel::RotationY => "rotation_3d_y",
            Channel::RotationZ => "rotation_3d_z",
            Channel::Fov => "fov",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Errors raised when assembling channel arrays from raw columns.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ChannelError {
    #[error("channel {channel:?} has {actual} values, expected {expected}")]
    LengthMismatch {
        channel: Channel,
        expected: usize,
        actual: usize,
    },
}

/// Seven index-aligned arrays, one entry per recorded frame.
///
/// All arrays always share the same length; construction and mutation
/// go through methods that keep it that way.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelArrays {
    columns: [Vec<f64>; 7],
}

impl ChannelArrays {
    /// Split a sample sequence into channel arrays.
    pub fn from_samples(samples: &[Sample]) -> Self {
        let mut columns: [Vec<f64>; 7] = Default::default();
        for column in &mut columns {
            column.reserve_exact(samples.len());
        }

        for sample in samples {
            let pose = &sample.pose;
            columns[0].push(pose.position.x);
            columns[1].push(pose.position.y);
            columns[2].push(pose.position.z);
            columns[3].push(pose.rotation.x);
            columns[4].push(pose.rotation.y);
            columns[5].push(pose.rotation.z);
            columns[6].push(pose.fov_degrees);
        }

        Self { columns }
    }

    /// Build from raw columns in [`Channel::ALL`] order.
    pub fn from_columns(columns: [Vec<f64>; 7]) -> Result<Self, ChannelError> {
        let expected = columns[0].len();
        for channel in Channel::ALL {
            let actual = columns[channel.index()].len();
            if actual != expected {
                return Err(ChannelError::LengthMismatch {
                    channel,
                    expected,
                    actual,
                });
            }
        }
        Ok(Self { columns })
    }

    /// Number of recorded frames.
    pub fn len(&self) -> usize {
        self.columns[0].len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Values of a single channel.
    pub fn channel(&self, channel: Channel) -> &[f64] {
        &self.columns[channel.index()]
    }

    /// Replace every channel with `f(channel, values)`.
    ///
    /// `f` must return as many values as it was given.
    pub fn map_channels<F>(&self, mut f: F) -> Self
    where
        F: FnMut(Channel, &[f64]) -> Vec<f64>,
    {
        let len = self.len();
        let columns = Channel::ALL.map(|channel| {
            let mapped = f(channel, self.channel(channel));
            debug_assert_eq!(mapped.len(), len, "{channel:?} changed length");
            mapped
        });
        Self { columns }
    }

    /// World-space position at `frame`.
    pub fn position(&self, frame: usize) -> Option<DVec3> {
        (frame < self.len()).then(|| {
            DVec3::new(
                self.columns[0][frame],
                self.columns[1][frame],
                self.columns[2][frame],
            )
        })
    }

    /// Euler rotation (radians) at `frame`.
    pub fn rotation(&self, frame: usize) -> Option<DVec3> {
        (frame < self.len()).then(|| {
            DVec3::new(
                self.columns[3][frame],
                self.columns[4][frame],
                self.columns[5][frame],
            )
        })
    }

    /// Full camera pose at `frame`.
    pub fn pose_at(&self, frame: usize) -> Option<CameraPose> {
        Some(CameraPose::new(
            self.position(frame)?,
            self.rotation(frame)?,
            self.columns[6][frame],
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples() -> Vec<Sample> {
        (0..4)
            .map(|i| {
                let f = i as f64;
                Sample::new(
                    i,
                    1.0 / 30.0,
                    CameraPose::new(
                        DVec3::new(f, f * 2.0, f * 3.0),
                        DVec3::new(f * 0.1, f * 0.2, f * 0.3),
                        60.0 + f,
                    ),
                )
            })
            .collect()
    }

    #[test]
    fn test_from_samples_keeps_arrays_aligned() {
        let arrays = ChannelArrays::from_samples(&samples());
        assert_eq!(arrays.len(), 4);
        for channel in Channel::ALL {
            assert_eq!(arrays.channel(channel).len(), 4);
        }
        assert_eq!(arrays.channel(Channel::TranslationY), &[0.0, 2.0, 4.0, 6.0]);
        assert_eq!(arrays.channel(Channel::Fov), &[60.0, 61.0, 62.0, 63.0]);
    }

    #[test]
    fn test_pose_at_reassembles_sample() {
        let samples = samples();
        let arrays = ChannelArrays::from_samples(&samples);
        assert_eq!(arrays.pose_at(2), Some(samples[2].pose));
        assert_eq!(arrays.pose_at(4), None);
    }

    #[test]
    fn test_empty_samples_yield_empty_arrays() {
        let arrays = ChannelArrays::from_samples(&[]);
        assert!(arrays.is_empty());
        assert_eq!(arrays.pose_at(0), None);
    }

    #[test]
    fn test_from_columns_rejects_ragged_input() {
        let mut columns: [Vec<f64>; 7] = Default::default();
        for column in &mut columns {
            column.extend([1.0, 2.0]);
        }
        columns[4].pop();

        let err = ChannelArrays::from_columns(columns).unwrap_err();
        assert_eq!(
            err,
            ChannelError::LengthMismatch {
                channel: Channel::RotationY,
                expected: 2,
                actual: 1,
            }
        );
    }

    #[test]
    fn test_map_channels_is_independent_copy() {
        let original = ChannelArrays::from_samples(&samples());
        let doubled = original.map_channels(|_, values| values.iter().map(|v| v * 2.0).collect());
        assert_eq!(doubled.channel(Channel::TranslationX), &[0.0, 2.0, 4.0, 6.0]);
        assert_eq!(original.channel(Channel::TranslationX), &[0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_schedule_names() {
        let names: Vec<_> = Channel::ALL.iter().map(|c| c.schedule_name()).collect();
        assert_eq!(
            names,
            [
                "translation_x",
                "translation_y",
                "translation_z",
                "rotation_3d_x",
                "rotation_3d_y",
                "rotation_3d_z",
                "fov"
            ]
        );
    }
}
