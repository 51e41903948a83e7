use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::config::Param;
use crate::state::{Input, State};

/// Wheel encoder readings derived from a vehicle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WheelSpeeds {
    /// Front steering angle (rad).
    pub steering: f64,
    /// Wheel speeds (rpm).
    pub lf_speed: f64,
    pub rf_speed: f64,
    pub lb_speed: f64,
    pub rb_speed: f64,
}

impl WheelSpeeds {
    /// Rolling speed of each wheel, assuming no longitudinal slip.
    pub fn from_state(state: &State, input: &Input, param: &Param) -> Self {
        let kinematic = &param.kinematic;
        let half_track = 0.5 * kinematic.track_width;
        let to_rpm = 60.0 / (2.0 * PI * param.tire.radius);

        // Body-frame velocity at each wheel hub: v + r × p
        let left_v_x = state.v_x - state.r * half_track;
        let right_v_x = state.v_x + state.r * half_track;
        let front_v_y = state.v_y + state.r * kinematic.l_f;

        let (sin_delta, cos_delta) = input.delta.sin_cos();
        let front_rolling = |v_x: f64| v_x * cos_delta + front_v_y * sin_delta;

        Self {
            steering: input.delta,
            lf_speed: front_rolling(left_v_x) * to_rpm,
            rf_speed: front_rolling(right_v_x) * to_rpm,
            lb_speed: left_v_x * to_rpm,
            rb_speed: right_v_x * to_rpm,
        }
    }
}
