use tracing::{info, warn};

use crate::config::SimulationConfig;
use crate::physics::{ModelError, Vehicle, VehicleModel};
use crate::sensors::WheelSpeeds;
use crate::state::{CommandMode, Input, State};
use crate::utils::errors::SimError;

/// Drives one vehicle model: holds the current state and the latest driver
/// command, and advances them once per tick.
#[derive(Debug, Clone)]
pub struct Simulator {
    name: String,
    vehicle: Vehicle,
    command_mode: CommandMode,
    initial_state: State,
    state: State,
    command: (f64, f64),
    input: Input,
    time: f64,
    ticks: u64,
}

impl Simulator {
    pub fn new(
        name: impl Into<String>,
        vehicle: Vehicle,
        command_mode: CommandMode,
        initial_state: State,
    ) -> Self {
        Self {
            name: name.into(),
            vehicle,
            command_mode,
            initial_state,
            state: initial_state,
            command: (0.0, 0.0),
            input: Input::default(),
            time: 0.0,
            ticks: 0,
        }
    }

    pub fn from_config(config: &SimulationConfig) -> Result<Self, SimError> {
        config.validate()?;
        let vehicle = Vehicle::from_config(&config.model)?;
        info!(
            name = %config.name,
            model = %config.model.kind,
            mode = %config.command_mode,
            "Simulator ready"
        );
        Ok(Self::new(
            config.name.clone(),
            vehicle,
            config.command_mode,
            config.initial_state,
        ))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    pub fn vehicle_mut(&mut self) -> &mut Vehicle {
        &mut self.vehicle
    }

    /// Ground-truth state.
    pub fn state(&self) -> &State {
        &self.state
    }

    /// Input applied on the last successful tick.
    pub fn input(&self) -> &Input {
        &self.input
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn command_mode(&self) -> CommandMode {
        self.command_mode
    }

    /// Latest driver command; `longitudinal` is an acceleration or a target
    /// speed depending on the command mode.
    pub fn set_command(&mut self, longitudinal: f64, delta: f64) {
        self.command = (longitudinal, delta);
    }

    /// Advance by `dt`. On an invalid timestep the tick is skipped and the
    /// state is left as it was.
    pub fn tick(&mut self, dt: f64) -> Result<&State, ModelError> {
        let (mut longitudinal, delta) = self.command;
        if self.command_mode == CommandMode::Velocity {
            let vel_max = self.vehicle.parameters().input_ranges.vel_max;
            longitudinal = longitudinal.clamp(-vel_max, vel_max);
        }
        let input = self.command_mode.resolve(longitudinal, delta, &self.state, dt);

        match self.vehicle.advance(&self.state, &input, dt) {
            Ok(next) => {
                self.state = next;
                self.input = input;
                self.time += dt;
                self.ticks += 1;
                Ok(&self.state)
            }
            Err(err) => {
                warn!(name = %self.name, %err, "Tick skipped");
                Err(err)
            }
        }
    }

    /// Noisy view of the current state.
    pub fn observe(&mut self) -> State {
        let state = self.state;
        self.vehicle.observe(&state)
    }

    pub fn wheel_speeds(&self) -> WheelSpeeds {
        WheelSpeeds::from_state(&self.state, &self.input, self.vehicle.parameters())
    }

    /// Return to the initial state and rewind the model's noise stream.
    pub fn reset(&mut self) {
        self.state = self.initial_state;
        self.command = (0.0, 0.0);
        self.input = Input::default();
        self.time = 0.0;
        self.ticks = 0;
        self.vehicle.reset();
        info!(name = %self.name, "Simulator reset");
    }
}
