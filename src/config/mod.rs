mod loader;
mod param;
mod simulation;

pub use loader::{ParamError, ParamMap};
pub use param::{
    AeroParams, BlendParams, InertiaParams, InputRanges, KinematicParams, Param, ParamSource,
    TireParams, VehicleType,
};
pub use simulation::{
    ModelConfig, ModelKind, NoiseChannels, NoiseConfig, ScriptedCommand, SimulationConfig,
};
