//! Record a scripted flight and export its schedules.

use std::path::PathBuf;

use anyhow::Context;
use camtrail_capture_engine::{ClipboardSink, Director, Pilot, PilotConfig, PlaybackTick};
use camtrail_common::config::AppConfig;
use camtrail_common::error::CamtrailResult;
use camtrail_schedule_export::{write_bundle, OutputFormat};
use camtrail_trajectory_model::{CameraPose, SmoothingOptions};

use super::ExportArgs;
use crate::flight::FlightShape;

pub struct SimulateArgs {
    pub shape: FlightShape,
    pub duration: f64,
    pub fps: Option<f64>,
    pub render_fps: f64,
    pub smooth_window: Option<usize>,
    pub smooth_iterations: Option<u32>,
    pub destructive: bool,
    pub playback: bool,
    pub export: ExportArgs,
    pub format: Option<String>,
    pub output: Option<PathBuf>,
}

/// Writes "copied" text to stdout.
struct StdoutSink;

impl ClipboardSink for StdoutSink {
    fn write_text(&mut self, text: &str) -> CamtrailResult<()> {
        use std::io::Write;
        let mut out = std::io::stdout().lock();
        out.write_all(text.as_bytes())?;
        out.flush()?;
        Ok(())
    }
}

pub fn run(config: &AppConfig, args: SimulateArgs) -> anyhow::Result<()> {
    if !(args.render_fps.is_finite() && args.render_fps > 0.0) {
        anyhow::bail!("--render-fps must be positive, got {}", args.render_fps);
    }

    let mut director = Director::new(config)?;
    if let Some(fps) = args.fps {
        director.set_fps(fps)?;
    }

    director.on_camera_ready(CameraPose::default());
    director.attach_pilot(
        Pilot::new(CameraPose::default(), PilotConfig::default()),
        Box::new(args.shape.script(args.duration)),
    );

    let delta = 1.0 / args.render_fps;
    let ticks = (args.duration.max(0.0) * args.render_fps).round() as usize;

    director.start_recording()?;
    for _ in 0..ticks {
        director.tick(delta);
    }
    let frames = director.stop_recording()?;
    eprintln!(
        "Recorded {frames} frames ({:?}, {:.1}s)",
        args.shape, args.duration
    );

    if args.smooth_window.is_some() || args.smooth_iterations.is_some() {
        let options = SmoothingOptions {
            window: args.smooth_window.unwrap_or(config.smoothing.window),
            iterations: args.smooth_iterations.unwrap_or(config.smoothing.iterations),
            non_destructive: !args.destructive,
        };
        director
            .apply_smoothing(&options)
            .context("Smoothing failed")?;
        eprintln!(
            "Smoothed with window {} x {} pass(es)",
            options.window, options.iterations
        );
    }

    if args.playback {
        replay(&mut director, delta)?;
    }

    let options = args
        .export
        .apply(config.export.options_for(director.total_frames()));
    let bundle = match director.export_schedules(&options) {
        Ok(bundle) => bundle,
        Err(e) if e.is_validation() => {
            anyhow::bail!("{e}\nRun `camtrail validate --frames {frames}` with the same options for details.")
        }
        Err(e) => return Err(anyhow::Error::new(e).context("Export failed")),
    };

    let format = match args.format.as_deref() {
        Some("json") => OutputFormat::Json,
        Some("text") | Some("txt") => OutputFormat::Text,
        Some(other) => anyhow::bail!("Unknown format '{other}'. Use json or text."),
        None => args
            .output
            .as_deref()
            .map(OutputFormat::from_path)
            .unwrap_or_default(),
    };

    match args.output {
        Some(path) => {
            let written = write_bundle(&path, &bundle, format)?;
            eprintln!("Schedules written to {}", written.display());
        }
        None => {
            let mut text = format.select(&bundle).to_string();
            if !text.ends_with('\n') {
                text.push('\n');
            }
            if !director.copy_to_clipboard(&text, &mut StdoutSink) {
                anyhow::bail!("Failed to write schedules to stdout");
            }
        }
    }

    Ok(())
}

fn replay(director: &mut Director, delta: f64) -> anyhow::Result<()> {
    if !director.start_playback()? {
        return Ok(());
    }

    let mut presented = 0usize;
    loop {
        let pose = director.camera().unwrap_or_default();
        match director.tick_with_pose(pose, delta).playback {
            PlaybackTick::Advanced { frame } => presented = frame + 1,
            PlaybackTick::Finished | PlaybackTick::Idle => break,
            PlaybackTick::Waiting => {}
        }
    }
    eprintln!("Replayed {presented} of {} frames", director.total_frames());
    Ok(())
}
