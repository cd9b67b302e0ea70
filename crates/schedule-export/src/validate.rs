//! Export option validation.

use camtrail_trajectory_model::ExportOptions;

/// Check `options` against a recording of `total_frames` frames.
///
/// Returns one human-readable message per violated rule; an empty list
/// means the options are usable. Never fails.
pub fn validate(options: &ExportOptions, total_frames: usize) -> Vec<String> {
    let mut violations = Vec::new();

    if total_frames == 0 {
        violations.push("no recorded frames to export".to_string());
    }
    if options.frame_end < options.frame_start {
        violations.push(format!(
            "frame_end ({}) must be >= frame_start ({})",
            options.frame_end, options.frame_start
        ));
    }
    if total_frames > 0 && options.frame_end >= total_frames {
        violations.push(format!(
            "frame_end ({}) must be < total frames ({total_frames})",
            options.frame_end
        ));
    }
    if options.frame_step == 0 {
        violations.push("frame_step must be > 0".to_string());
    }
    for (axis, scale) in ["x", "y", "z"].iter().zip(options.axis_scale()) {
        if !(scale.is_finite() && scale > 0.0) {
            violations.push(format!("scale_{axis} must be > 0 (got {scale})"));
        }
    }
    if options.cadence == 0 {
        violations.push("cadence must be >= 1".to_string());
    }
    if !options.master_scale_translate.is_finite() {
        violations.push("master_scale_translate must be a finite number".to_string());
    }
    if !options.master_scale_rotate.is_finite() {
        violations.push("master_scale_rotate must be a finite number".to_string());
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate(&ExportOptions::for_frames(10), 10).is_empty());
    }

    #[test]
    fn test_reports_every_violation() {
        let opts = ExportOptions {
            frame_start: 8,
            frame_end: 12,
            frame_step: 0,
            scale_y: 0.0,
            scale_z: f64::NAN,
            cadence: 0,
            ..ExportOptions::for_frames(10)
        };
        let violations = validate(&opts, 10);
        assert_eq!(violations.len(), 5, "{violations:?}");
        assert!(violations.iter().any(|v| v.starts_with("frame_end (12) must be < total")));
        assert!(violations.iter().any(|v| v == "frame_step must be > 0"));
        assert!(violations.iter().any(|v| v.starts_with("scale_y")));
        assert!(violations.iter().any(|v| v.starts_with("scale_z")));
        assert!(violations.iter().any(|v| v == "cadence must be >= 1"));
    }

    #[test]
    fn test_inverted_range() {
        let opts = ExportOptions {
            frame_start: 5,
            frame_end: 2,
            ..ExportOptions::for_frames(10)
        };
        assert_eq!(
            validate(&opts, 10),
            vec!["frame_end (2) must be >= frame_start (5)".to_string()]
        );
    }

    #[test]
    fn test_empty_recording() {
        let violations = validate(&ExportOptions::for_frames(0), 0);
        assert_eq!(violations, vec!["no recorded frames to export".to_string()]);
    }

    #[test]
    fn test_negative_master_scale_is_allowed() {
        let opts = ExportOptions {
            master_scale_translate: -4.0,
            master_scale_rotate: 0.0,
            ..ExportOptions::for_frames(3)
        };
        assert!(validate(&opts, 3).is_empty());
    }
}
