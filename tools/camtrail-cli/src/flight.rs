//! Canned flight paths for headless recording.

use camtrail_capture_engine::{ControlSegment, ControlState, ScriptedControls};
use clap::ValueEnum;

/// Flight paths the `simulate` command can fly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FlightShape {
    /// Straight forward push.
    Dolly,
    /// Strafe right while turning left, circling a point ahead.
    Orbit,
    /// Rise while tilting down.
    Crane,
    /// Push in, bank into a turn, climb, then roll and zoom out.
    Flythrough,
}

impl FlightShape {
    /// Control script lasting `duration_secs`.
    pub fn script(self, duration_secs: f64) -> ScriptedControls {
        let d = duration_secs.max(0.0);
        let segment = |fraction: f64, controls: ControlState| ControlSegment {
            duration_secs: d * fraction,
            controls,
        };

        let segments = match self {
            Self::Dolly => vec![segment(
                1.0,
                ControlState {
                    forward: 1.0,
                    ..ControlState::default()
                },
            )],
            Self::Orbit => vec![segment(
                1.0,
                ControlState {
                    right: 1.0,
                    yaw: 1.0,
                    ..ControlState::default()
                },
            )],
            Self::Crane => vec![segment(
                1.0,
                ControlState {
                    up: 1.0,
                    pitch: -0.3,
                    ..ControlState::default()
                },
            )],
            Self::Flythrough => vec![
                segment(
                    0.4,
                    ControlState {
                        forward: 1.0,
                        ..ControlState::default()
                    },
                ),
                segment(
                    0.2,
                    ControlState {
                        forward: 1.0,
                        yaw: 0.6,
                        roll: 0.3,
                        ..ControlState::default()
                    },
                ),
                segment(
                    0.2,
                    ControlState {
                        forward: 1.0,
                        up: 0.5,
                        pitch: 0.2,
                        boost: true,
                        ..ControlState::default()
                    },
                ),
                segment(
                    0.2,
                    ControlState {
                        roll: -0.3,
                        zoom: 1.0,
                        ..ControlState::default()
                    },
                ),
            ],
        };
        ScriptedControls::new(segments)
    }
}
