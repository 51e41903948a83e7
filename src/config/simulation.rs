use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::config::param::{ParamSource, VehicleType};
use crate::state::{CommandMode, State};
use crate::utils::errors::SimError;

/// Which vehicle model to instantiate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    PointMass,
    #[default]
    DynamicBicycle,
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ModelKind::PointMass => "point_mass",
            ModelKind::DynamicBicycle => "dynamic_bicycle",
        };
        write!(f, "{s}")
    }
}

impl FromStr for ModelKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "point_mass" | "PointMass" => Ok(ModelKind::PointMass),
            "dynamic_bicycle" | "DynamicBicycle" => Ok(ModelKind::DynamicBicycle),
            other => Err(format!("unknown vehicle model `{other}`")),
        }
    }
}

/// Standard deviations of the Gaussian noise applied to each state channel.
/// A zero entry leaves that channel untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseChannels {
    /// x and y (m).
    pub position: f64,
    /// yaw (rad).
    pub yaw: f64,
    /// v_x and v_y (m/s).
    pub velocity: f64,
    /// r (rad/s).
    pub yaw_rate: f64,
    /// a_x and a_y (m/s²).
    pub acceleration: f64,
}

impl NoiseChannels {
    pub fn is_enabled(&self) -> bool {
        [
            self.position,
            self.yaw,
            self.velocity,
            self.yaw_rate,
            self.acceleration,
        ]
        .iter()
        .any(|sigma| *sigma > 0.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseConfig {
    /// Perturbs the state returned from every model update.
    pub process: NoiseChannels,
    /// Perturbs observed copies of the state, leaving ground truth intact.
    pub observation: NoiseChannels,
}

/// Per-model settings shared by every vehicle model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub kind: ModelKind,
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub noise: NoiseConfig,
    pub params: ParamSource,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            kind: ModelKind::DynamicBicycle,
            seed: 0,
            noise: NoiseConfig::default(),
            params: ParamSource::Programmed {
                vehicle: VehicleType::AdsDv,
            },
        }
    }
}

/// A piece of a piecewise-constant driver script, active until `until`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScriptedCommand {
    pub until: f64,
    pub longitudinal: f64,
    #[serde(default)]
    pub delta: f64,
}

/// Top-level description of one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub command_mode: CommandMode,
    #[serde(default)]
    pub initial_state: State,
    #[serde(default = "default_timestep")]
    pub timestep: f64,
    #[serde(default = "default_duration")]
    pub duration: f64,
    #[serde(default)]
    pub commands: Vec<ScriptedCommand>,
}

fn default_name() -> String {
    "vehicle".to_string()
}

fn default_timestep() -> f64 {
    0.01
}

fn default_duration() -> f64 {
    10.0
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            model: ModelConfig::default(),
            command_mode: CommandMode::default(),
            initial_state: State::default(),
            timestep: default_timestep(),
            duration: default_duration(),
            commands: Vec::new(),
        }
    }
}

impl SimulationConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, SimError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SimError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    pub fn validate(&self) -> Result<(), SimError> {
        if !(self.timestep.is_finite() && self.timestep > 0.0) {
            return Err(SimError::InvalidConfig(format!(
                "timestep must be positive, got {}",
                self.timestep
            )));
        }
        if !(self.duration.is_finite() && self.duration >= 0.0) {
            return Err(SimError::InvalidConfig(format!(
                "duration must not be negative, got {}",
                self.duration
            )));
        }
        if self
            .commands
            .windows(2)
            .any(|pair| pair[1].until < pair[0].until)
        {
            return Err(SimError::InvalidConfig(
                "scripted commands must be ordered by `until`".to_string(),
            ));
        }
        Ok(())
    }

    /// Number of whole ticks in the run.
    pub fn steps(&self) -> usize {
        (self.duration / self.timestep).round() as usize
    }

    /// The scripted `(longitudinal, delta)` command at time `t`. Past the last
    /// entry the car coasts straight.
    pub fn command_at(&self, t: f64) -> (f64, f64) {
        self.commands
            .iter()
            .find(|cmd| t < cmd.until)
            .map(|cmd| (cmd.longitudinal, cmd.delta))
            .unwrap_or((0.0, 0.0))
    }
}
