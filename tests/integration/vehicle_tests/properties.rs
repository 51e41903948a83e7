use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use roadster::config::NoiseConfig;
use roadster::{DynamicBicycle, Input, ModelError, ModelKind, State, Vehicle, VehicleModel};

use crate::common::{
    assert_state_valid, create_noisy_dynamic_bicycle, create_test_noise, create_test_param,
    step_once, TEST_DT,
};

fn random_input(rng: &mut ChaCha8Rng) -> Input {
    // Deliberately wider than the vehicle's envelope
    Input::new(rng.gen_range(-20.0..20.0), rng.gen_range(-1.0..1.0))
}

fn random_state(rng: &mut ChaCha8Rng) -> State {
    State {
        x: rng.gen_range(-100.0..100.0),
        y: rng.gen_range(-100.0..100.0),
        yaw: rng.gen_range(-10.0..10.0),
        v_x: rng.gen_range(-5.0..30.0),
        v_y: rng.gen_range(-5.0..5.0),
        r: rng.gen_range(-3.0..3.0),
        a_x: rng.gen_range(-20.0..20.0),
        a_y: rng.gen_range(-20.0..20.0),
    }
}

fn models() -> Vec<Vehicle> {
    [ModelKind::PointMass, ModelKind::DynamicBicycle]
        .into_iter()
        .map(|kind| Vehicle::new(kind, create_test_param(), 7, create_test_noise()).unwrap())
        .collect()
}

#[test]
fn test_random_drives_stay_finite() {
    let mut rng = ChaCha8Rng::seed_from_u64(2024);

    for mut model in models() {
        for _ in 0..20 {
            let mut state = State::default();
            for _ in 0..500 {
                let dt = rng.gen_range(0.001..0.05);
                let input = random_input(&mut rng);
                state = model.advance(&state, &input, dt).unwrap();
                assert_state_valid(&state);
            }
        }
    }
}

#[test]
fn test_random_single_steps_stay_finite() {
    let mut rng = ChaCha8Rng::seed_from_u64(99);

    for mut model in models() {
        for _ in 0..2000 {
            let state = random_state(&mut rng);
            let input = random_input(&mut rng);
            let next = model.advance(&state, &input, TEST_DT).unwrap();
            assert_state_valid(&next);
        }
    }
}

#[test]
fn test_nan_input_is_neutralised() {
    for mut model in models() {
        let state = State::new(0.0, 0.0, 0.0, 5.0);
        let next = model
            .advance(&state, &Input::new(f64::NAN, f64::NAN), TEST_DT)
            .unwrap();
        assert_state_valid(&next);
        assert!(model.diagnostics().inputs_clamped >= 1);
    }
}

#[test]
fn test_invalid_timestep_is_rejected() {
    for mut model in models() {
        for dt in [0.0, -0.01, f64::NAN, f64::INFINITY] {
            let result = model.advance(&State::default(), &Input::new(1.0, 0.0), dt);
            assert!(matches!(result, Err(ModelError::InvalidTimestep(_))));
        }
        assert_eq!(model.diagnostics().timesteps_rejected, 4);
    }
}

#[test]
fn test_same_seed_same_trajectory() {
    let mut first = create_noisy_dynamic_bicycle(42);
    let mut second = create_noisy_dynamic_bicycle(42);
    let mut a = State::default();
    let mut b = State::default();

    for i in 0..1000 {
        let input = Input::new(2.0, 0.2 * (i as f64 * 0.01).sin());
        a = step_once(&mut first, a, input, TEST_DT);
        b = step_once(&mut second, b, input, TEST_DT);
        assert_eq!(a, b);
        assert_eq!(first.observe(&a), second.observe(&b));
    }
}

#[test]
fn test_different_seed_different_trajectory() {
    let mut first = create_noisy_dynamic_bicycle(1);
    let mut second = create_noisy_dynamic_bicycle(2);
    let input = Input::new(2.0, 0.1);

    let a = (0..100).fold(State::default(), |s, _| step_once(&mut first, s, input, TEST_DT));
    let b = (0..100).fold(State::default(), |s, _| step_once(&mut second, s, input, TEST_DT));
    assert_ne!(a, b);
}

#[test]
fn test_reset_replays_noise_stream() {
    let mut model = create_noisy_dynamic_bicycle(5);
    let input = Input::new(1.0, 0.05);

    let run = |model: &mut DynamicBicycle| {
        (0..50).fold(State::default(), |s, _| step_once(model, s, input, TEST_DT))
    };
    let before = run(&mut model);
    model.reset();
    let after = run(&mut model);
    assert_eq!(before, after);
}

#[test]
fn test_observation_leaves_ground_truth_untouched() {
    let mut model = create_noisy_dynamic_bicycle(3);
    let state = State::new(1.0, 2.0, 0.3, 6.0);

    let observed = model.observe(&state);
    assert_ne!(observed, state);
    assert_state_valid(&observed);

    let quiet = Vehicle::new(
        ModelKind::DynamicBicycle,
        create_test_param(),
        3,
        NoiseConfig::default(),
    )
    .unwrap()
    .observe(&state);
    assert_eq!(quiet, state);
}
