use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::InputRanges;
use crate::physics::error::ModelError;
use crate::state::{Input, State};
use crate::utils::constants::MAX_TIMESTEP;
use crate::utils::math::wrap_angle;

/// Running count of recovered anomalies for one model instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostics {
    /// Commands clamped into the vehicle's envelope.
    pub inputs_clamped: u64,
    /// Non-finite state scalars reset to a fallback value.
    pub values_repaired: u64,
    /// Ticks refused because of an unusable timestep.
    pub timesteps_rejected: u64,
}

/// Accept only positive, finite timesteps.
pub fn check_timestep(dt: f64, diagnostics: &mut Diagnostics) -> Result<(), ModelError> {
    if !(dt.is_finite() && dt > 0.0) {
        diagnostics.timesteps_rejected += 1;
        warn!(dt, "Rejecting timestep, tick skipped");
        return Err(ModelError::InvalidTimestep(dt));
    }
    if dt > MAX_TIMESTEP {
        debug!(dt, max = MAX_TIMESTEP, "Timestep is large for explicit integration");
    }
    Ok(())
}

/// Clamp a command into the physical envelope. Non-finite channels become 0.
pub fn clamp_input(input: &Input, ranges: &InputRanges, diagnostics: &mut Diagnostics) -> Input {
    let acc = clamp_channel("acc", input.acc, ranges.acc_min, ranges.acc_max, diagnostics);
    let delta = clamp_channel(
        "delta",
        input.delta,
        -ranges.delta_max,
        ranges.delta_max,
        diagnostics,
    );
    Input { acc, delta }
}

fn clamp_channel(name: &str, value: f64, min: f64, max: f64, diagnostics: &mut Diagnostics) -> f64 {
    if value.is_nan() {
        diagnostics.inputs_clamped += 1;
        warn!(channel = name, "Non-finite command replaced with 0");
        return 0.0;
    }
    let clamped = value.clamp(min, max);
    if clamped != value {
        diagnostics.inputs_clamped += 1;
        debug!(channel = name, requested = value, applied = clamped, "Command out of range");
    }
    clamped
}

/// Replace every non-finite scalar of `candidate` with the matching value of
/// `fallback`, or 0 where the fallback is not finite either. Yaw is wrapped.
pub fn repair_state(candidate: &State, fallback: &State, diagnostics: &mut Diagnostics) -> State {
    let mut repaired = *candidate;
    let fallback_fields = fallback.fields();

    for (i, value) in repaired.fields_mut().into_iter().enumerate() {
        if value.is_finite() {
            continue;
        }
        let replacement = if fallback_fields[i].is_finite() {
            fallback_fields[i]
        } else {
            0.0
        };
        diagnostics.values_repaired += 1;
        warn!(
            field = State::FIELD_NAMES[i],
            value = *value,
            replacement,
            "Numeric anomaly in vehicle state repaired"
        );
        *value = replacement;
    }

    repaired.yaw = wrap_angle(repaired.yaw);
    repaired
}
