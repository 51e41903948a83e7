use crate::config::Param;
use crate::physics::components::Diagnostics;
use crate::physics::error::ModelError;
use crate::physics::services::ModelServices;
use crate::state::{Input, State};

/// A vehicle model that advances a state by one timestep.
///
/// `advance` is the only behaviour that differs between models; the rest is
/// provided through the model's [`ModelServices`].
pub trait VehicleModel: Send {
    /// Compute the state `dt` seconds after `state` under `input`.
    ///
    /// Fails only for a non-positive or non-finite `dt`, in which case the
    /// caller should keep `state`. Out-of-range inputs are clamped and
    /// non-finite results repaired.
    fn advance(&mut self, state: &State, input: &Input, dt: f64) -> Result<State, ModelError>;

    fn services(&self) -> &ModelServices;
    fn services_mut(&mut self) -> &mut ModelServices;

    fn parameters(&self) -> &Param {
        self.services().param()
    }

    fn diagnostics(&self) -> &Diagnostics {
        self.services().diagnostics()
    }

    /// A noisy copy of `state` as seen by the vehicle's sensors.
    fn observe(&mut self, state: &State) -> State {
        self.services_mut().observe(state)
    }

    fn reset(&mut self) {
        self.services_mut().reset();
    }
}
