use crate::config::{NoiseChannels, NoiseConfig};
use crate::state::State;
use crate::utils::math::wrap_angle;
use crate::utils::rng::GaussianNoise;

/// Applies configured Gaussian noise to vehicle states.
#[derive(Debug, Clone)]
pub struct NoiseInjector {
    sampler: GaussianNoise,
    config: NoiseConfig,
}

impl NoiseInjector {
    pub fn new(seed: u64, config: NoiseConfig) -> Self {
        Self {
            sampler: GaussianNoise::new(seed),
            config,
        }
    }

    pub fn config(&self) -> &NoiseConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.sampler.seed()
    }

    pub fn reset(&mut self) {
        self.sampler.reset();
    }

    pub fn sample(&mut self, mu: f64, sigma: f64) -> f64 {
        self.sampler.sample(mu, sigma)
    }

    /// Copy of `state` with every channel perturbed by its configured sigma.
    pub fn perturb(&mut self, state: &State, channels: &NoiseChannels) -> State {
        State {
            x: self.sample(state.x, channels.position),
            y: self.sample(state.y, channels.position),
            yaw: wrap_angle(self.sample(state.yaw, channels.yaw)),
            v_x: self.sample(state.v_x, channels.velocity),
            v_y: self.sample(state.v_y, channels.velocity),
            r: self.sample(state.r, channels.yaw_rate),
            a_x: self.sample(state.a_x, channels.acceleration),
            a_y: self.sample(state.a_y, channels.acceleration),
        }
    }

    /// Process noise, if any is configured.
    pub fn apply_process(&mut self, state: &State) -> State {
        let channels = self.config.process;
        if channels.is_enabled() {
            self.perturb(state, &channels)
        } else {
            *state
        }
    }

    /// Observation noise; the input state is left untouched.
    pub fn observe(&mut self, state: &State) -> State {
        let channels = self.config.observation;
        self.perturb(state, &channels)
    }
}
