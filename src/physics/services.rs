use crate::config::{NoiseConfig, Param};
use crate::physics::components::validation::{self, Diagnostics};
use crate::physics::components::NoiseInjector;
use crate::physics::error::ModelError;
use crate::state::{Input, State};

/// Parameters, validation and noise shared by every vehicle model.
///
/// Each model owns one of these; nothing in it is shared between instances.
#[derive(Debug, Clone)]
pub struct ModelServices {
    param: Param,
    noise: NoiseInjector,
    diagnostics: Diagnostics,
}

impl ModelServices {
    pub fn new(param: Param, seed: u64, noise: NoiseConfig) -> Result<Self, ModelError> {
        param.validate()?;
        Ok(Self {
            param,
            noise: NoiseInjector::new(seed, noise),
            diagnostics: Diagnostics::default(),
        })
    }

    pub fn param(&self) -> &Param {
        &self.param
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn noise(&self) -> &NoiseInjector {
        &self.noise
    }

    pub fn check_timestep(&mut self, dt: f64) -> Result<(), ModelError> {
        validation::check_timestep(dt, &mut self.diagnostics)
    }

    pub fn validate_input(&mut self, input: &Input) -> Input {
        validation::clamp_input(input, &self.param.input_ranges, &mut self.diagnostics)
    }

    /// Repair non-finite scalars against `fallback`.
    pub fn validate_state(&mut self, state: &State, fallback: &State) -> State {
        validation::repair_state(state, fallback, &mut self.diagnostics)
    }

    pub fn sample(&mut self, mu: f64, sigma: f64) -> f64 {
        self.noise.sample(mu, sigma)
    }

    pub fn apply_process_noise(&mut self, state: &State) -> State {
        self.noise.apply_process(state)
    }

    pub fn observe(&mut self, state: &State) -> State {
        self.noise.observe(state)
    }

    /// Rewind the noise stream and clear diagnostics.
    pub fn reset(&mut self) {
        self.noise.reset();
        self.diagnostics = Diagnostics::default();
    }
}
