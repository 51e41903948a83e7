use roadster::State;
use std::f64::consts::PI;

/// Assert that every scalar of the state is finite
#[track_caller]
pub fn assert_state_finite(state: &State) {
    for (name, value) in State::FIELD_NAMES.iter().zip(state.fields()) {
        assert!(value.is_finite(), "State field {name} is not finite: {value}");
    }
}

/// Assert that the state is finite and its heading is normalised
#[track_caller]
pub fn assert_state_valid(state: &State) {
    assert_state_finite(state);
    assert!(
        state.yaw > -PI && state.yaw <= PI,
        "Yaw {} outside (-pi, pi]",
        state.yaw
    );
}

/// Assert that `right` is the exact mirror image of `left` about the
/// vehicle's longitudinal axis
#[track_caller]
pub fn assert_mirrored(left: &State, right: &State) {
    assert_eq!(left.v_x, right.v_x, "v_x differs");
    assert_eq!(left.v_y, -right.v_y, "v_y not mirrored");
    assert_eq!(left.r, -right.r, "yaw rate not mirrored");
    assert_eq!(left.a_x, right.a_x, "a_x differs");
    assert_eq!(left.a_y, -right.a_y, "a_y not mirrored");
}
