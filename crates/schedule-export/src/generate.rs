//! Schedule generation.
//!
//! Deforum treats the motion schedules as per-frame increments that it
//! accumulates itself, so every keyframe carries the change since the
//! previous keyframe rather than an absolute value:
//!
//! 1. Pick keyframes: the clamped frame window, stepped by `frame_step`,
//!    keeping only multiples of `cadence`.
//! 2. Translation: world displacement since the previous keyframe, rotated
//!    into that keyframe's camera frame, then axis scale, convention signs,
//!    and the master translate scale.
//! 3. Rotation: Euler difference in degrees, then convention sign/scale and
//!    the master rotate scale.
//! 4. The first keyframe is always zero on every motion channel.
//! 5. With `cadence <= 1`, optionally zero-fill frames the step skipped.

use camtrail_trajectory_model::{
    master_scale_factor, CameraPose, ChannelArrays, CoordinateConvention, DeforumSchedules,
    ExportOptions, Schedule,
};
use glam::DVec3;

/// Frames that receive a schedule entry, ascending.
pub fn keyframe_frames(options: &ExportOptions, total_frames: usize) -> Vec<usize> {
    let Some((start, end)) = options.frame_window(total_frames) else {
        return Vec::new();
    };
    let step = options.frame_step.max(1);
    let cadence = options.cadence.max(1);

    let first = if cadence > 1 {
        start.div_ceil(cadence) * cadence
    } else {
        start
    };
    if first > end {
        return Vec::new();
    }

    (first..=end)
        .step_by(step)
        .filter(|frame| frame % cadence == 0)
        .collect()
}

/// Per-channel sparse schedules before string formatting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChannelSchedules {
    pub translation: [Schedule; 3],
    pub rotation: [Schedule; 3],
    pub fov: Option<Schedule>,
}

impl ChannelSchedules {
    /// Format every schedule into the exported document.
    pub fn to_document(&self) -> DeforumSchedules {
        let [tx, ty, tz] = &self.translation;
        let [rx, ry, rz] = &self.rotation;
        DeforumSchedules {
            translation_x: tx.to_string(),
            translation_y: ty.to_string(),
            translation_z: tz.to_string(),
            rotation_3d_x: rx.to_string(),
            rotation_3d_y: ry.to_string(),
            rotation_3d_z: rz.to_string(),
            fov: self.fov.as_ref().map(Schedule::to_string),
        }
    }
}

/// Build the sparse per-channel schedules. Pure; never mutates `channels`.
pub fn build_channel_schedules(
    channels: &ChannelArrays,
    options: &ExportOptions,
    convention: &CoordinateConvention,
) -> ChannelSchedules {
    let mut out = ChannelSchedules {
        fov: options.include_fov.then(Schedule::new),
        ..ChannelSchedules::default()
    };

    let axis_scale = options.axis_scale();
    let translate_factor = master_scale_factor(options.master_scale_translate);
    let rotate_factor = master_scale_factor(options.master_scale_rotate);
    let rotation_factors = convention.rotation_factors();

    let mut previous: Option<CameraPose> = None;
    for frame in keyframe_frames(options, channels.len()) {
        let Some(pose) = channels.pose_at(frame) else {
            continue;
        };

        let (translation, rotation) = match previous {
            None => (DVec3::ZERO, DVec3::ZERO),
            Some(prev) => (
                prev.to_local(pose.position - prev.position),
                degrees(pose.rotation - prev.rotation),
            ),
        };

        for axis in 0..3 {
            let t = translation[axis]
                * axis_scale[axis]
                * convention.translation_signs[axis]
                * translate_factor;
            let r = rotation[axis] * rotation_factors[axis] * rotate_factor;
            out.translation[axis].insert(frame, t);
            out.rotation[axis].insert(frame, r);
        }
        if let Some(fov) = out.fov.as_mut() {
            fov.insert(frame, pose.fov_degrees);
        }

        previous = Some(pose);
    }

    // Zero-filling between sparse cadence keyframes would read as "stop"
    // to the interpolator, so it only applies when every frame is a keyframe.
    if options.include_empty_frames && options.cadence <= 1 {
        if let Some((start, end)) = options.frame_window(channels.len()) {
            for schedule in out.translation.iter_mut().chain(out.rotation.iter_mut()) {
                schedule.backfill_zeros(start, end);
            }
            if let Some(fov) = out.fov.as_mut() {
                fov.backfill_zeros(start, end);
            }
        }
    }

    out
}

/// Generate the schedule document for `channels`.
pub fn generate_schedules(
    channels: &ChannelArrays,
    options: &ExportOptions,
    convention: &CoordinateConvention,
) -> DeforumSchedules {
    build_channel_schedules(channels, options, convention).to_document()
}

fn degrees(radians: DVec3) -> DVec3 {
    DVec3::new(
        radians.x.to_degrees(),
        radians.y.to_degrees(),
        radians.z.to_degrees(),
    )
}
