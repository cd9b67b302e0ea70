//! Trajectory smoothing.
//!
//! Applies a centered moving average to every channel of a recording.
//! The window shrinks at both ends of the sequence instead of padding or
//! wrapping, so the first and last frames are averaged only with the
//! neighbours that actually exist.

use camtrail_trajectory_model::{ChannelArrays, SmoothingOptions};

/// Centered moving-average smoother for channel arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrajectorySmoother {
    window: usize,
    iterations: u32,
}

impl TrajectorySmoother {
    /// Create a smoother. `window <= 1` or `iterations == 0` is a no-op.
    pub fn new(window: usize, iterations: u32) -> Self {
        Self { window, iterations }
    }

    pub fn from_options(options: &SmoothingOptions) -> Self {
        Self::new(options.window, options.iterations)
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Smooth every channel independently, `iterations` times.
    ///
    /// Each pass consumes the previous pass's output.
    pub fn smooth(&self, arrays: &ChannelArrays) -> ChannelArrays {
        let mut current = arrays.clone();
        for _ in 0..self.iterations {
            current = current.map_channels(|_, values| moving_average(values, self.window));
        }

        tracing::debug!(
            frames = arrays.len(),
            window = self.window,
            iterations = self.iterations,
            "Smoothed trajectory"
        );
        current
    }
}

/// Centered moving average over `window` samples.
///
/// Output `i` is the mean of inputs in
/// `[max(0, i - window/2), min(len - 1, i + window/2)]`.
pub fn moving_average(values: &[f64], window: usize) -> Vec<f64> {
    if values.is_empty() || window <= 1 {
        return values.to_vec();
    }

    let half = window / 2;
    let mut result = Vec::with_capacity(values.len());

    for i in 0..values.len() {
        let start = i.saturating_sub(half);
        let end = (i + half + 1).min(values.len());
        let count = (end - start) as f64;

        let sum: f64 = values[start..end].iter().sum();
        result.push(sum / count);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use camtrail_trajectory_model::{CameraPose, Channel, Sample};
    use proptest::prelude::*;

    /// Arrays whose every channel holds `values[i]` (fov offset by 60).
    fn pose_line(values: &[f64]) -> ChannelArrays {
        let samples: Vec<Sample> = values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let mut pose = CameraPose::default();
                pose.position.x = *v;
                pose.position.y = *v;
                pose.position.z = *v;
                pose.rotation.x = *v;
                pose.rotation.y = *v;
                pose.rotation.z = *v;
                pose.fov_degrees = 60.0 + *v;
                Sample::new(i as u32, 1.0 / 30.0, pose)
            })
            .collect();
        ChannelArrays::from_samples(&samples)
    }

    #[test]
    fn test_boundary_window_shrinks() {
        let out = moving_average(&[10.0, 20.0, 30.0, 40.0], 3);
        assert_eq!(out, vec![15.0, 20.0, 30.0, 35.0]);
    }

    #[test]
    fn test_window_one_is_copy() {
        let input = [1.0, 5.0, -2.0];
        assert_eq!(moving_average(&input, 1), input.to_vec());
        assert_eq!(moving_average(&input, 0), input.to_vec());
    }

    #[test]
    fn test_even_window_uses_half_floor() {
        // window 4 -> half 2 -> five-wide neighbourhood in the interior
        let out = moving_average(&[0.0, 0.0, 10.0, 0.0, 0.0], 4);
        assert_eq!(out[2], 2.0);
        assert!((out[0] - 10.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_input() {
        assert!(moving_average(&[], 5).is_empty());
    }

    #[test]
    fn test_iterations_compose() {
        let arrays = pose_line(&[0.0, 0.0, 9.0, 0.0, 0.0]);
        let once = TrajectorySmoother::new(3, 1).smooth(&arrays);
        let twice = TrajectorySmoother::new(3, 2).smooth(&arrays);

        let expected_twice = moving_average(once.channel(Channel::TranslationX), 3);
        assert_eq!(twice.channel(Channel::TranslationX), expected_twice.as_slice());

        assert_close(once.channel(Channel::TranslationX), &[0.0, 3.0, 3.0, 3.0, 0.0]);
        assert_close(
            twice.channel(Channel::TranslationX),
            &[1.5, 2.0, 3.0, 2.0, 1.5],
        );

        // Each pass flattens the spike: squared first differences 162 -> 18 -> 2.5.
        let raw = roughness(arrays.channel(Channel::TranslationX));
        let r_once = roughness(once.channel(Channel::TranslationX));
        let r_twice = roughness(twice.channel(Channel::TranslationX));
        assert!(r_once < raw);
        assert!(r_twice < r_once);
        assert!((r_twice - 2.5).abs() < 1e-12);
    }

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
            assert!((a - e).abs() < 1e-12, "index {i}: {a} != {e}");
        }
    }

    fn roughness(values: &[f64]) -> f64 {
        values.windows(2).map(|w| (w[1] - w[0]).powi(2)).sum()
    }

    #[test]
    fn test_smooth_touches_every_channel() {
        let arrays = pose_line(&[10.0, 20.0, 30.0, 40.0]);
        let smoothed = TrajectorySmoother::new(3, 1).smooth(&arrays);
        for channel in Channel::MOTION {
            assert_eq!(smoothed.channel(channel), &[15.0, 20.0, 30.0, 35.0]);
        }
        assert_eq!(smoothed.channel(Channel::Fov), &[75.0, 80.0, 90.0, 95.0]);
    }

    #[test]
    fn test_zero_iterations_is_identity() {
        let arrays = pose_line(&[1.0, 7.0, 3.0]);
        assert_eq!(TrajectorySmoother::new(5, 0).smooth(&arrays), arrays);
    }

    proptest! {
        #[test]
        fn moving_average_preserves_length_and_bounds(
            values in prop::collection::vec(-1000.0f64..1000.0, 0..64),
            window in 0usize..16,
        ) {
            let out = moving_average(&values, window);
            prop_assert_eq!(out.len(), values.len());

            if let (Some(min), Some(max)) = (
                values.iter().cloned().reduce(f64::min),
                values.iter().cloned().reduce(f64::max),
            ) {
                for v in out {
                    prop_assert!(v >= min - 1e-9 && v <= max + 1e-9);
                }
            }
        }

        #[test]
        fn constant_sequences_are_fixed_points(
            value in -100.0f64..100.0,
            len in 1usize..40,
            window in 1usize..9,
        ) {
            let values = vec![value; len];
            for v in moving_average(&values, window) {
                prop_assert!((v - value).abs() < 1e-9);
            }
        }
    }
}
