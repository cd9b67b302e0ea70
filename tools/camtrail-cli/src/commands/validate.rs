//! Check export options against a recording length.

use camtrail_common::config::AppConfig;
use camtrail_schedule_export::{keyframe_frames, validate};

use super::ExportArgs;

pub fn run(config: &AppConfig, frames: usize, export: &ExportArgs) -> anyhow::Result<()> {
    let options = export.apply(config.export.options_for(frames));
    println!("Validating export options for {frames} frames");
    println!(
        "  Window: {}..={} step {} cadence {}",
        options.frame_start, options.frame_end, options.frame_step, options.cadence
    );

    let violations = validate(&options, frames);
    if !violations.is_empty() {
        println!("\nValidation issues:");
        for violation in &violations {
            println!("  - {violation}");
        }
        anyhow::bail!("{} issue(s) found", violations.len());
    }

    let keyframes = keyframe_frames(&options, frames);
    println!("  Keyframes: {}", keyframes.len());
    if let (Some(first), Some(last)) = (keyframes.first(), keyframes.last()) {
        println!("  First/last: {first} / {last}");
    }
    println!("\nOptions are valid.");
    Ok(())
}
