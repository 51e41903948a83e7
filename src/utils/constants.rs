pub const GRAVITY: f64 = 9.81; // m/s^2
pub const AIR_DENSITY: f64 = 1.225; // kg/m^3, sea level

pub const MAX_TIMESTEP: f64 = 0.1; // Largest step the explicit integrator is trusted with

// Longitudinal speed floor inside the slip-angle arctangent (m/s)
pub const SLIP_SPEED_FLOOR: f64 = 1.0;

// Gaussian samples are truncated to this many standard deviations
pub const NOISE_SIGMA_BOUND: f64 = 3.0;
