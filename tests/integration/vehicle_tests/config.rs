use pretty_assertions::assert_eq;
use roadster::config::{ParamError, ParamMap, VehicleType};
use roadster::{ModelKind, Param, ParamSource, SimulationConfig, Simulator, Vehicle, VehicleModel};
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

fn manifest_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(relative)
}

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_shipped_parameter_file_matches_preset() {
    let from_file = Param::new(&ParamSource::File {
        path: manifest_path("configs/ads_dv.yaml"),
    })
    .unwrap();
    let programmed = Param::new(&ParamSource::Programmed {
        vehicle: VehicleType::AdsDv,
    })
    .unwrap();
    assert_eq!(from_file, programmed);
}

#[test]
fn test_written_parameters_load_back() {
    let mut param = Param::ads_dv();
    param.inertia.mass = 420.0;
    param.tire.b_rear = 10.0;

    let map = param.to_map();
    let yaml = map
        .keys()
        .map(|key| format!("{key}: {}\n", map.require(key).unwrap()))
        .collect::<String>();
    let file = write_temp(&yaml);

    let loaded = Param::new(&ParamSource::File {
        path: file.path().to_path_buf(),
    })
    .unwrap();
    assert_eq!(loaded, param);
}

#[test]
fn test_missing_parameter_is_named() {
    let yaml = std::fs::read_to_string(manifest_path("configs/ads_dv.yaml"))
        .unwrap()
        .replace("  area: 1.0\n", "");
    let file = write_temp(&yaml);

    let err = Param::new(&ParamSource::File {
        path: file.path().to_path_buf(),
    })
    .unwrap_err();
    match err {
        ParamError::MissingParameter(key) => assert_eq!(key, "aero.area"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_non_physical_parameter_rejected() {
    let mut map = Param::ads_dv().to_map();
    map.insert("inertia.mass", -1.0);
    assert!(matches!(
        Param::from_map(&map),
        Err(ParamError::InvalidParameter { .. })
    ));

    let mut param = Param::ads_dv();
    param.kinematic.l_f = 0.0;
    param.kinematic.l_r = 0.0;
    let result = Vehicle::new(ModelKind::DynamicBicycle, param, 0, Default::default());
    assert!(result.is_err());
}

#[test]
fn test_missing_file_reports_io_error() {
    let err = Param::new(&ParamSource::File {
        path: manifest_path("configs/does_not_exist.yaml"),
    })
    .unwrap_err();
    assert!(matches!(err, ParamError::FileError(_)));
}

#[test]
fn test_simulation_config_from_file() {
    let yaml = format!(
        r#"
name: hairpin
model:
  kind: point_mass
  seed: 9
  params:
    source: file
    path: {}
command_mode: velocity
initial_state:
  x: 5.0
  v_x: 2.0
timestep: 0.02
duration: 1.0
commands:
  - {{ until: 0.5, longitudinal: 4.0 }}
  - {{ until: 1.0, longitudinal: 4.0, delta: 0.1 }}
"#,
        manifest_path("configs/ads_dv.yaml").display()
    );
    let file = write_temp(&yaml);

    let config = SimulationConfig::from_file(file.path()).unwrap();
    assert_eq!(config.model.kind, ModelKind::PointMass);
    assert_eq!(config.steps(), 50);
    assert_eq!(config.command_at(0.7), (4.0, 0.1));

    let sim = Simulator::from_config(&config).unwrap();
    assert_eq!(sim.state().x, 5.0);
    assert_eq!(sim.state().v_x, 2.0);
    assert_eq!(sim.vehicle().kind(), ModelKind::PointMass);
    assert_eq!(sim.vehicle().parameters(), &Param::ads_dv());
}

#[test]
fn test_example_scenario_loads() {
    let config = SimulationConfig::from_file(manifest_path("configs/skidpad.yaml")).unwrap();
    assert_eq!(config.name, "skidpad");
    assert_eq!(config.model.kind, ModelKind::DynamicBicycle);
    assert!(config.model.noise.observation.is_enabled());
    assert!(!config.model.noise.process.is_enabled());
}

#[test]
fn test_unknown_model_kind_rejected() {
    let yaml = "model:\n  kind: hovercraft\n  params:\n    source: programmed\n    vehicle: ads_dv\n";
    assert!(SimulationConfig::from_yaml_str(yaml).is_err());
    assert!("hovercraft".parse::<ModelKind>().is_err());
}

#[test]
fn test_param_map_requires_numbers() {
    let map = ParamMap::from_yaml_str("inertia:\n  mass: heavy\n").unwrap();
    assert!(matches!(
        map.require("inertia.mass"),
        Err(ParamError::InvalidParameter { .. })
    ));
}
