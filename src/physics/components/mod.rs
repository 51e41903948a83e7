pub mod blend;
pub mod noise;
pub mod tire;
pub mod validation;

pub use noise::NoiseInjector;
pub use tire::Axle;
pub use validation::Diagnostics;
