use rayon::prelude::*;

use crate::config::SimulationConfig;
use crate::physics::ModelError;
use crate::simulation::Simulator;
use crate::state::State;
use crate::utils::errors::SimError;
use crate::utils::rng::RngManager;

/// Independent simulators stepped in parallel. Each simulator owns its
/// model exclusively, so no synchronisation is needed between them.
#[derive(Debug, Clone, Default)]
pub struct Fleet {
    simulators: Vec<Simulator>,
}

impl Fleet {
    pub fn new(simulators: Vec<Simulator>) -> Self {
        Self { simulators }
    }

    /// Build one simulator per config, deriving each model's noise seed from
    /// `master_seed` and the vehicle name.
    pub fn from_configs(configs: &[SimulationConfig], master_seed: u64) -> Result<Self, SimError> {
        let rng_manager = RngManager::new(master_seed);
        let simulators = configs
            .iter()
            .map(|config| {
                let mut config = config.clone();
                config.model.seed = rng_manager.seed_for(&config.name);
                Simulator::from_config(&config)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { simulators })
    }

    pub fn len(&self) -> usize {
        self.simulators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.simulators.is_empty()
    }

    pub fn simulators(&self) -> &[Simulator] {
        &self.simulators
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Simulator> {
        self.simulators.iter_mut().find(|sim| sim.name() == name)
    }

    /// Tick every vehicle by `dt`; results are in fleet order.
    pub fn step(&mut self, dt: f64) -> Vec<Result<State, ModelError>> {
        self.simulators
            .par_iter_mut()
            .map(|sim| sim.tick(dt).copied())
            .collect()
    }

    pub fn states(&self) -> Vec<State> {
        self.simulators.iter().map(|sim| *sim.state()).collect()
    }
}
