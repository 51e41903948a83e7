use crate::config::{NoiseConfig, Param};
use crate::physics::error::ModelError;
use crate::physics::services::ModelServices;
use crate::physics::traits::VehicleModel;
use crate::state::{Input, State};
use crate::utils::math::wrap_angle;

/// Planar double integrator with no slip, tire forces or yaw dynamics.
///
/// The commanded acceleration is applied along the steering direction and
/// the heading always follows the velocity vector.
#[derive(Debug, Clone)]
pub struct PointMass {
    services: ModelServices,
}

impl PointMass {
    pub fn new(param: Param, seed: u64, noise: NoiseConfig) -> Result<Self, ModelError> {
        Ok(Self {
            services: ModelServices::new(param, seed, noise)?,
        })
    }

    pub fn with_param(param: Param) -> Result<Self, ModelError> {
        Self::new(param, 0, NoiseConfig::default())
    }

    /// `[ẋ, ẏ, v̇_x, v̇_y]` for the given state and (validated) input.
    pub fn derivative(&self, state: &State, input: &Input) -> State {
        State {
            x: state.v_x,
            y: state.v_y,
            v_x: input.acc * input.delta.cos(),
            v_y: input.acc * input.delta.sin(),
            ..State::default()
        }
    }
}

impl VehicleModel for PointMass {
    fn advance(&mut self, state: &State, input: &Input, dt: f64) -> Result<State, ModelError> {
        self.services.check_timestep(dt)?;
        let input = self.services.validate_input(input);
        let current = self.services.validate_state(state, &State::default());

        let x_dot = self.derivative(&current, &input);

        let mut next = current.integrate(&x_dot, dt);
        next.a_x = x_dot.v_x;
        next.a_y = x_dot.v_y;
        next.r = 0.0;
        next.yaw = wrap_angle(next.v_y.atan2(next.v_x));

        let next = self.services.apply_process_noise(&next);
        Ok(self.services.validate_state(&next, &current))
    }

    fn services(&self) -> &ModelServices {
        &self.services
    }

    fn services_mut(&mut self) -> &mut ModelServices {
        &mut self.services
    }
}
