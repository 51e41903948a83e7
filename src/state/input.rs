use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::state::State;

/// Driver command for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Input {
    /// Requested longitudinal acceleration (m/s²).
    pub acc: f64,
    /// Requested front steering angle (rad).
    pub delta: f64,
}

impl Input {
    pub fn new(acc: f64, delta: f64) -> Self {
        Self { acc, delta }
    }
}

/// How the longitudinal channel of a driver command is interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandMode {
    /// The command is an acceleration request.
    #[default]
    Acceleration,
    /// The command is a target longitudinal speed; the acceleration needed
    /// to reach it within one tick is requested (and later clamped).
    Velocity,
}

impl CommandMode {
    /// Turn a raw `(longitudinal, steering)` command into an `Input`.
    pub fn resolve(self, longitudinal: f64, delta: f64, state: &State, dt: f64) -> Input {
        let acc = match self {
            CommandMode::Acceleration => longitudinal,
            CommandMode::Velocity => (longitudinal - state.v_x) / dt,
        };
        Input { acc, delta }
    }
}

impl fmt::Display for CommandMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CommandMode::Acceleration => "acceleration",
            CommandMode::Velocity => "velocity",
        };
        write!(f, "{s}")
    }
}

impl FromStr for CommandMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "acceleration" | "acc" => Ok(CommandMode::Acceleration),
            "velocity" | "vel" => Ok(CommandMode::Velocity),
            other => Err(format!("unknown command mode `{other}`")),
        }
    }
}
