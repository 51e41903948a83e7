mod dynamic_bicycle;
mod point_mass;

pub use dynamic_bicycle::{DynamicBicycle, TireForces};
pub use point_mass::PointMass;

use tracing::info;

use crate::config::{ModelConfig, ModelKind, NoiseConfig, Param};
use crate::physics::error::ModelError;
use crate::physics::services::ModelServices;
use crate::physics::traits::VehicleModel;
use crate::state::{Input, State};

/// One of the available vehicle models, selected by configuration.
#[derive(Debug, Clone)]
pub enum Vehicle {
    PointMass(PointMass),
    DynamicBicycle(DynamicBicycle),
}

impl Vehicle {
    pub fn new(
        kind: ModelKind,
        param: Param,
        seed: u64,
        noise: NoiseConfig,
    ) -> Result<Self, ModelError> {
        let vehicle = match kind {
            ModelKind::PointMass => Vehicle::PointMass(PointMass::new(param, seed, noise)?),
            ModelKind::DynamicBicycle => {
                Vehicle::DynamicBicycle(DynamicBicycle::new(param, seed, noise)?)
            }
        };
        info!(model = %kind, seed, "Vehicle model created");
        Ok(vehicle)
    }

    /// Load parameters from the configured source and build the model.
    pub fn from_config(config: &ModelConfig) -> Result<Self, ModelError> {
        let param = Param::new(&config.params)?;
        Self::new(config.kind, param, config.seed, config.noise)
    }

    pub fn kind(&self) -> ModelKind {
        match self {
            Vehicle::PointMass(_) => ModelKind::PointMass,
            Vehicle::DynamicBicycle(_) => ModelKind::DynamicBicycle,
        }
    }
}

impl VehicleModel for Vehicle {
    fn advance(&mut self, state: &State, input: &Input, dt: f64) -> Result<State, ModelError> {
        match self {
            Vehicle::PointMass(model) => model.advance(state, input, dt),
            Vehicle::DynamicBicycle(model) => model.advance(state, input, dt),
        }
    }

    fn services(&self) -> &ModelServices {
        match self {
            Vehicle::PointMass(model) => model.services(),
            Vehicle::DynamicBicycle(model) => model.services(),
        }
    }

    fn services_mut(&mut self) -> &mut ModelServices {
        match self {
            Vehicle::PointMass(model) => model.services_mut(),
            Vehicle::DynamicBicycle(model) => model.services_mut(),
        }
    }
}
