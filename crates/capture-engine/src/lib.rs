//! camtrail Capture Engine
//!
//! Everything that runs inside the host's render loop: sampling the camera
//! at a fixed rate, smoothing and reverting the recording, replaying it,
//! and flying the camera from a control source.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                   Director                    │
//! │  ┌───────┐   ┌──────────┐   ┌──────────────┐  │
//! │  │ Pilot │──►│ Recorder │   │ Playback     │  │
//! │  └───▲───┘   └────┬─────┘   │ Driver       │  │
//! │      │            │ stop    └──────▲───────┘  │
//! │  ControlSource    ▼                │          │
//! │            ChannelArrays snapshot ─┘          │
//! │                   │                           │
//! │                   ▼                           │
//! │            DeforumExporter ──► ExportBundle   │
//! └──────────────────────────────────────────────┘
//! ```

pub mod director;
pub mod pilot;
pub mod playback;
pub mod recorder;

pub use director::{ClipboardSink, Director, DirectorMode, MemoryClipboard, TickOutcome};
pub use pilot::{ControlSegment, ControlSource, ControlState, Pilot, PilotConfig, ScriptedControls};
pub use playback::{PlaybackDriver, PlaybackState, PlaybackTick};
pub use recorder::Recorder;
