//! Low-speed hand-over between the kinematic and dynamic bicycle models.
//!
//! Slip angles are undefined at standstill, so at low speed the motion is
//! taken from the no-slip kinematic model. The dynamic weight rises from 0 at
//! `v_min` to 1 at `v_min + v_band` along a cubic smoothstep, which keeps both
//! the blended velocities and their rate of change continuous in speed.

use crate::config::BlendParams;
use crate::utils::math::smoothstep;

/// Weight given to the dynamic model at `speed` (m/s), in `[0, 1]`.
pub fn dynamic_weight(speed: f64, blend: &BlendParams) -> f64 {
    smoothstep(blend.v_min, blend.v_min + blend.v_band, speed.abs())
}

/// `weight·dynamic + (1 − weight)·kinematic`
#[inline]
pub fn mix(weight: f64, dynamic: f64, kinematic: f64) -> f64 {
    weight * dynamic + (1.0 - weight) * kinematic
}
