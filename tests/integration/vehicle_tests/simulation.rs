use approx::assert_relative_eq;
use roadster::config::{ModelConfig, NoiseChannels, NoiseConfig};
use roadster::{CommandMode, Fleet, ModelKind, SimulationConfig, Simulator, State, VehicleModel};

use crate::common::assert_state_valid;

fn config(name: &str, kind: ModelKind) -> SimulationConfig {
    SimulationConfig {
        name: name.to_string(),
        model: ModelConfig {
            kind,
            noise: NoiseConfig {
                process: NoiseChannels {
                    velocity: 0.01,
                    ..NoiseChannels::default()
                },
                ..NoiseConfig::default()
            },
            ..ModelConfig::default()
        },
        ..SimulationConfig::default()
    }
}

#[test]
fn test_velocity_mode_reaches_target_speed() {
    let mut config = config("cruise", ModelKind::DynamicBicycle);
    config.model.noise = NoiseConfig::default();
    config.command_mode = CommandMode::Velocity;
    let mut sim = Simulator::from_config(&config).unwrap();

    sim.set_command(8.0, 0.0);
    for _ in 0..1000 {
        sim.tick(0.01).unwrap();
    }
    assert_relative_eq!(sim.state().v_x, 8.0, epsilon = 0.05);
    assert_relative_eq!(sim.time(), 10.0, epsilon = 1e-9);
    assert_eq!(sim.ticks(), 1000);
}

#[test]
fn test_invalid_tick_keeps_state() {
    let mut sim = Simulator::from_config(&config("skip", ModelKind::PointMass)).unwrap();
    sim.set_command(2.0, 0.0);
    sim.tick(0.01).unwrap();
    let before = *sim.state();

    assert!(sim.tick(-1.0).is_err());
    assert_eq!(*sim.state(), before);
    assert_eq!(sim.ticks(), 1);
    assert_eq!(sim.vehicle().diagnostics().timesteps_rejected, 1);
}

#[test]
fn test_reset_replays_run() {
    let mut sim = Simulator::from_config(&config("replay", ModelKind::DynamicBicycle)).unwrap();

    let drive = |sim: &mut Simulator| -> State {
        sim.set_command(3.0, 0.15);
        for _ in 0..300 {
            sim.tick(0.005).unwrap();
        }
        *sim.state()
    };

    let first = drive(&mut sim);
    sim.reset();
    assert_eq!(*sim.state(), State::default());
    assert_eq!(sim.time(), 0.0);
    let second = drive(&mut sim);
    assert_eq!(first, second);
}

#[test]
fn test_wheel_speeds_while_cornering() {
    let mut config = config("wheels", ModelKind::DynamicBicycle);
    config.model.noise = NoiseConfig::default();
    let mut sim = Simulator::from_config(&config).unwrap();

    sim.set_command(3.0, 0.2);
    for _ in 0..400 {
        sim.tick(0.005).unwrap();
    }
    let speeds = sim.wheel_speeds();
    assert!(speeds.lf_speed > 0.0);
    assert!(speeds.rb_speed > speeds.lb_speed, "outer rear wheel should spin faster");
    assert!(speeds.rf_speed > speeds.lf_speed, "outer front wheel should spin faster");
}

#[test]
fn test_fleet_is_deterministic_and_independent() {
    let configs = vec![
        config("alpha", ModelKind::DynamicBicycle),
        config("beta", ModelKind::DynamicBicycle),
        config("gamma", ModelKind::PointMass),
    ];

    let run = || {
        let mut fleet = Fleet::from_configs(&configs, 11).unwrap();
        for sim in ["alpha", "beta", "gamma"] {
            fleet.get_mut(sim).unwrap().set_command(2.0, 0.1);
        }
        for _ in 0..200 {
            for result in fleet.step(0.01) {
                assert_state_valid(&result.unwrap());
            }
        }
        fleet.states()
    };

    let first = run();
    let second = run();
    assert_eq!(first.len(), 3);
    assert_eq!(first, second);
    // Same commands, different noise seeds
    assert_ne!(first[0], first[1]);
}
