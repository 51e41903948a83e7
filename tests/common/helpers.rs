use roadster::{Input, State, VehicleModel};

/// Advance `model` for `steps` ticks under a constant input and return every
/// intermediate state (excluding the start).
pub fn run_constant<M: VehicleModel>(
    model: &mut M,
    start: State,
    input: Input,
    dt: f64,
    steps: usize,
) -> Vec<State> {
    let mut state = start;
    (0..steps)
        .map(|_| {
            state = model.advance(&state, &input, dt).expect("valid timestep");
            state
        })
        .collect()
}

/// Single update from `start`.
pub fn step_once<M: VehicleModel>(model: &mut M, start: State, input: Input, dt: f64) -> State {
    model.advance(&start, &input, dt).expect("valid timestep")
}
