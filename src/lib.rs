//! Reduced-order ground vehicle dynamics for driving and racing simulators.
//!
//! A [`Vehicle`](physics::Vehicle) advances a [`State`](state::State) under a
//! driver [`Input`](state::Input) by one timestep. Two interchangeable models
//! are provided: a point-mass double integrator and a nonlinear dynamic
//! bicycle with magic-formula tires, aerodynamic loads and a low-speed
//! kinematic blend.

pub mod config;
pub mod physics;
pub mod sensors;
pub mod simulation;
pub mod state;
pub mod utils;

pub use config::{ModelConfig, ModelKind, Param, ParamSource, SimulationConfig};
pub use physics::{DynamicBicycle, ModelError, PointMass, Vehicle, VehicleModel};
pub use simulation::{Fleet, Simulator};
pub use state::{CommandMode, Input, State};
