//! Nonlinear single-track (bicycle) model.
//!
//! Forces per update:
//! - longitudinal: commanded drive/brake force net of aerodynamic drag
//! - normal: static axle load plus per-axle aerodynamic downforce
//! - lateral: magic-formula tire force from each axle's slip angle
//!
//! Below `blend.v_min + blend.v_band` the slip-based velocities are blended
//! with a no-slip kinematic bicycle, since slip angles are ill-defined as the
//! car comes to rest.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::config::{NoiseConfig, Param};
use crate::physics::components::blend::{dynamic_weight, mix};
use crate::physics::components::tire::{self, Axle};
use crate::physics::error::ModelError;
use crate::physics::services::ModelServices;
use crate::physics::traits::VehicleModel;
use crate::state::{Input, State};
use crate::utils::constants::SLIP_SPEED_FLOOR;
use crate::utils::math::{body_to_world, wrap_angle};

/// Forces acting on the car for one update. Tire quantities are per tire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TireForces {
    /// Net longitudinal force on the chassis (N).
    pub fx: f64,
    pub fz_front: f64,
    pub fz_rear: f64,
    pub alpha_front: f64,
    pub alpha_rear: f64,
    pub fy_front: f64,
    pub fy_rear: f64,
}

#[derive(Debug, Clone)]
pub struct DynamicBicycle {
    services: ModelServices,
}

impl DynamicBicycle {
    pub fn new(param: Param, seed: u64, noise: NoiseConfig) -> Result<Self, ModelError> {
        Ok(Self {
            services: ModelServices::new(param, seed, noise)?,
        })
    }

    pub fn with_param(param: Param) -> Result<Self, ModelError> {
        Self::new(param, 0, NoiseConfig::default())
    }

    fn param(&self) -> &Param {
        self.services.param()
    }

    /// Aerodynamic drag, opposing the direction of travel (N).
    pub fn drag_force(&self, state: &State) -> f64 {
        let aero = &self.param().aero;
        aero.c_drag * aero.dynamic_load(state.v_x) * state.v_x.signum()
    }

    /// Downforce on one axle (N).
    pub fn downforce(&self, state: &State, axle: Axle) -> f64 {
        let aero = &self.param().aero;
        let coefficient = match axle {
            Axle::Front => aero.c_down_front,
            Axle::Rear => aero.c_down_rear,
        };
        coefficient * aero.dynamic_load(state.v_x)
    }

    /// Drive/brake force net of drag (N). Braking never pushes a stopped
    /// car backwards.
    pub fn longitudinal_force(&self, state: &State, input: &Input) -> f64 {
        let acc = if state.v_x <= 0.0 && input.acc < 0.0 {
            0.0
        } else {
            input.acc
        };
        self.param().inertia.mass * acc - self.drag_force(state)
    }

    /// Vertical load on one tire of `axle` (N).
    pub fn normal_force(&self, state: &State, axle: Axle) -> f64 {
        let param = self.param();
        let weight = param.inertia.mass * param.inertia.gravity;
        let wheelbase = param.kinematic.wheelbase();
        let static_share = match axle {
            Axle::Front => param.kinematic.l_r / wheelbase,
            Axle::Rear => param.kinematic.l_f / wheelbase,
        };
        0.5 * (weight * static_share + self.downforce(state, axle))
    }

    /// Angle between the wheel heading and its velocity at `axle` (rad).
    ///
    /// Positive slip produces a force towards +y (left).
    pub fn slip_angle(&self, state: &State, input: &Input, axle: Axle) -> f64 {
        let kinematic = &self.param().kinematic;
        let v_x = state.v_x.max(SLIP_SPEED_FLOOR);
        match axle {
            Axle::Front => input.delta - ((state.v_y + kinematic.l_f * state.r) / v_x).atan(),
            Axle::Rear => -((state.v_y - kinematic.l_r * state.r) / v_x).atan(),
        }
    }

    /// Lateral force of one tire on `axle` (N).
    pub fn lateral_force(&self, fz: f64, axle: Axle, slip_angle: f64) -> f64 {
        tire::lateral_force(&self.param().tire, axle, fz, slip_angle)
    }

    pub fn forces(&self, state: &State, input: &Input) -> TireForces {
        let fz_front = self.normal_force(state, Axle::Front);
        let fz_rear = self.normal_force(state, Axle::Rear);
        let alpha_front = self.slip_angle(state, input, Axle::Front);
        let alpha_rear = self.slip_angle(state, input, Axle::Rear);
        TireForces {
            fx: self.longitudinal_force(state, input),
            fz_front,
            fz_rear,
            alpha_front,
            alpha_rear,
            fy_front: self.lateral_force(fz_front, Axle::Front, alpha_front),
            fy_rear: self.lateral_force(fz_rear, Axle::Rear, alpha_rear),
        }
    }

    /// Planar rigid-body equations of motion.
    pub fn derivative(&self, state: &State, input: &Input, forces: &TireForces) -> State {
        let param = self.param();
        let mass = param.inertia.mass;
        let fy_front = 2.0 * forces.fy_front;
        let fy_rear = 2.0 * forces.fy_rear;
        let (sin_delta, cos_delta) = input.delta.sin_cos();

        let world_velocity = body_to_world(state.yaw, Vector2::new(state.v_x, state.v_y));

        State {
            x: world_velocity.x,
            y: world_velocity.y,
            yaw: state.r,
            v_x: state.r * state.v_y + (forces.fx - sin_delta * fy_front) / mass,
            v_y: (cos_delta * fy_front + fy_rear) / mass - state.r * state.v_x,
            r: (cos_delta * fy_front * param.kinematic.l_f - fy_rear * param.kinematic.l_r)
                / param.inertia.i_z,
            a_x: 0.0,
            a_y: 0.0,
        }
    }

    /// Blend the dynamic step `dynamic_next` with a no-slip kinematic step
    /// according to the speed of `state`.
    pub fn kinematic_correction(
        &self,
        dynamic_next: &State,
        state: &State,
        input: &Input,
        fx: f64,
        dt: f64,
    ) -> State {
        let param = self.param();
        let wheelbase = param.kinematic.wheelbase();
        let weight = dynamic_weight(state.speed(), &param.blend);

        let v_x_kinematic = state.v_x + dt * fx / param.inertia.mass;
        let v_x = mix(weight, dynamic_next.v_x, v_x_kinematic);

        let tan_delta = input.delta.tan();
        let v_y_kinematic = tan_delta * v_x * param.kinematic.l_r / wheelbase;
        let r_kinematic = tan_delta * v_x / wheelbase;

        State {
            v_x,
            v_y: mix(weight, dynamic_next.v_y, v_y_kinematic),
            r: mix(weight, dynamic_next.r, r_kinematic),
            ..*dynamic_next
        }
    }
}

impl VehicleModel for DynamicBicycle {
    fn advance(&mut self, state: &State, input: &Input, dt: f64) -> Result<State, ModelError> {
        self.services.check_timestep(dt)?;
        let input = self.services.validate_input(input);
        let current = self.services.validate_state(state, &State::default());

        let forces = self.forces(&current, &input);
        let x_dot = self.derivative(&current, &input, &forces);
        let dynamic_next = current.integrate(&x_dot, dt);

        let mut next = self.kinematic_correction(&dynamic_next, &current, &input, forces.fx, dt);
        next.yaw = wrap_angle(next.yaw);

        // Braking stops the car rather than reversing it. Non-finite values
        // are left for state validation to repair.
        if next.v_x < 0.0 && next.v_x.is_finite() {
            next.v_x = 0.0;
        }

        // Body-frame acceleration including the rotating-frame terms
        next.a_x = (next.v_x - current.v_x) / dt - next.r * next.v_y;
        next.a_y = (next.v_y - current.v_y) / dt + next.r * next.v_x;

        let next = self.services.apply_process_noise(&next);
        let mut next = self.services.validate_state(&next, &current);
        next.v_x = next.v_x.max(0.0);
        Ok(next)
    }

    fn services(&self) -> &ModelServices {
        &self.services
    }

    fn services_mut(&mut self) -> &mut ModelServices {
        &mut self.services
    }
}
