use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul};

/// Planar vehicle state at one instant.
///
/// Position and heading are in the world frame; velocities and
/// accelerations are in the body frame (x forward, y left).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct State {
    /// World position (m).
    pub x: f64,
    pub y: f64,
    /// Heading (rad), kept in (-π, π].
    pub yaw: f64,
    /// Longitudinal velocity (m/s).
    pub v_x: f64,
    /// Lateral velocity (m/s).
    pub v_y: f64,
    /// Yaw rate (rad/s).
    pub r: f64,
    /// Longitudinal acceleration from the last update (m/s²).
    pub a_x: f64,
    /// Lateral acceleration from the last update (m/s²).
    ///
    /// Recovered from the velocity change over the step. Below the blend
    /// speed the lateral velocity snaps to the steering geometry, so a
    /// steering step shows up as a spike that scales with `1/dt`.
    pub a_y: f64,
}

impl State {
    pub const FIELD_NAMES: [&'static str; 8] = ["x", "y", "yaw", "v_x", "v_y", "r", "a_x", "a_y"];

    /// A vehicle at `(x, y)` heading `yaw`, rolling straight at `v_x`.
    pub fn new(x: f64, y: f64, yaw: f64, v_x: f64) -> Self {
        Self {
            x,
            y,
            yaw,
            v_x,
            ..Self::default()
        }
    }

    pub fn position(&self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }

    pub fn body_velocity(&self) -> Vector2<f64> {
        Vector2::new(self.v_x, self.v_y)
    }

    /// Magnitude of the planar velocity.
    pub fn speed(&self) -> f64 {
        self.v_x.hypot(self.v_y)
    }

    pub fn is_finite(&self) -> bool {
        self.fields().iter().all(|v| v.is_finite())
    }

    pub fn fields(&self) -> [f64; 8] {
        [
            self.x, self.y, self.yaw, self.v_x, self.v_y, self.r, self.a_x, self.a_y,
        ]
    }

    pub fn fields_mut(&mut self) -> [&mut f64; 8] {
        [
            &mut self.x,
            &mut self.y,
            &mut self.yaw,
            &mut self.v_x,
            &mut self.v_y,
            &mut self.r,
            &mut self.a_x,
            &mut self.a_y,
        ]
    }

    /// One explicit Euler step: `self + derivative·dt`.
    pub fn integrate(&self, derivative: &State, dt: f64) -> State {
        *self + *derivative * dt
    }
}

impl Add for State {
    type Output = State;

    fn add(self, rhs: State) -> State {
        State {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            yaw: self.yaw + rhs.yaw,
            v_x: self.v_x + rhs.v_x,
            v_y: self.v_y + rhs.v_y,
            r: self.r + rhs.r,
            a_x: self.a_x + rhs.a_x,
            a_y: self.a_y + rhs.a_y,
        }
    }
}

impl Mul<f64> for State {
    type Output = State;

    fn mul(self, rhs: f64) -> State {
        State {
            x: self.x * rhs,
            y: self.y * rhs,
            yaw: self.yaw * rhs,
            v_x: self.v_x * rhs,
            v_y: self.v_y * rhs,
            r: self.r * rhs,
            a_x: self.a_x * rhs,
            a_y: self.a_y * rhs,
        }
    }
}
