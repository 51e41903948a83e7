use roadster::config::{NoiseChannels, NoiseConfig};
use roadster::{DynamicBicycle, Param, PointMass};

pub const TEST_DT: f64 = 0.005;

/// Standard test vehicle
pub fn create_test_param() -> Param {
    Param::ads_dv()
}

pub fn create_point_mass() -> PointMass {
    PointMass::with_param(create_test_param()).expect("valid test parameters")
}

pub fn create_dynamic_bicycle() -> DynamicBicycle {
    DynamicBicycle::with_param(create_test_param()).expect("valid test parameters")
}

/// Noise on every channel, both on the process and on observations
pub fn create_test_noise() -> NoiseConfig {
    let channels = NoiseChannels {
        position: 0.01,
        yaw: 0.001,
        velocity: 0.02,
        yaw_rate: 0.005,
        acceleration: 0.05,
    };
    NoiseConfig {
        process: channels,
        observation: channels,
    }
}

pub fn create_noisy_dynamic_bicycle(seed: u64) -> DynamicBicycle {
    DynamicBicycle::new(create_test_param(), seed, create_test_noise())
        .expect("valid test parameters")
}
