pub mod components;
pub mod error;
pub mod models;
pub mod services;
pub mod traits;

pub use components::{Axle, Diagnostics};
pub use error::ModelError;
pub use models::{DynamicBicycle, PointMass, TireForces, Vehicle};
pub use services::ModelServices;
pub use traits::VehicleModel;
