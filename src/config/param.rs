use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;
use std::path::PathBuf;
use tracing::info;

use crate::config::loader::{ParamError, ParamMap};
use crate::utils::constants::{AIR_DENSITY, GRAVITY};

/// Mass properties.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InertiaParams {
    /// Total vehicle mass (kg).
    pub mass: f64,
    /// Yaw moment of inertia (kg·m²).
    pub i_z: f64,
    /// Gravitational acceleration (m/s²).
    pub gravity: f64,
}

/// Chassis geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KinematicParams {
    /// Centre of mass to front axle (m).
    pub l_f: f64,
    /// Centre of mass to rear axle (m).
    pub l_r: f64,
    /// Distance between left and right wheels (m).
    pub track_width: f64,
}

impl KinematicParams {
    pub fn wheelbase(&self) -> f64 {
        self.l_f + self.l_r
    }
}

/// Coefficients of the simplified magic-formula tire.
///
/// `b_front`/`b_rear` are the per-axle stiffness factors; the small-slip
/// cornering stiffness of one tire is `B·C·D·Fz`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TireParams {
    pub b_front: f64,
    pub b_rear: f64,
    /// Shape factor.
    pub c: f64,
    /// Peak friction coefficient.
    pub d: f64,
    /// Curvature factor.
    pub e: f64,
    /// Rolling radius (m).
    pub radius: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AeroParams {
    pub c_drag: f64,
    /// Downforce coefficient acting on the front axle.
    pub c_down_front: f64,
    /// Downforce coefficient acting on the rear axle.
    pub c_down_rear: f64,
    /// Frontal area (m²).
    pub area: f64,
    /// Air density (kg/m³).
    pub air_density: f64,
}

impl AeroParams {
    /// Dynamic pressure times area, `½ρA·v²`.
    pub fn dynamic_load(&self, speed: f64) -> f64 {
        0.5 * self.air_density * self.area * speed * speed
    }
}

/// Physical envelope driver commands are clamped to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputRanges {
    pub acc_min: f64,
    pub acc_max: f64,
    /// Largest steering angle magnitude (rad).
    pub delta_max: f64,
    /// Top speed reachable in velocity command mode (m/s).
    pub vel_max: f64,
}

/// Speed band over which the kinematic correction hands over to the
/// dynamic model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlendParams {
    /// Below this speed the motion is purely kinematic (m/s).
    pub v_min: f64,
    /// Width of the transition band above `v_min` (m/s).
    pub v_band: f64,
}

/// Static description of one vehicle. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Param {
    pub inertia: InertiaParams,
    pub kinematic: KinematicParams,
    pub tire: TireParams,
    pub aero: AeroParams,
    pub input_ranges: InputRanges,
    pub blend: BlendParams,
}

/// Source for vehicle parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum ParamSource {
    Programmed { vehicle: VehicleType },
    File { path: PathBuf },
}

/// Vehicles with built-in parameter sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleType {
    /// ADS-DV Formula Student autonomous development vehicle.
    AdsDv,
}

impl Param {
    pub fn new(source: &ParamSource) -> Result<Self, ParamError> {
        match source {
            ParamSource::Programmed { vehicle } => Ok(Self::from_programmed(*vehicle)),
            ParamSource::File { path } => {
                info!("Loading vehicle parameters from {}", path.display());
                Self::from_map(&ParamMap::from_file(path)?)
            }
        }
    }

    fn from_programmed(vehicle: VehicleType) -> Self {
        match vehicle {
            VehicleType::AdsDv => Self::ads_dv(),
        }
    }

    pub fn ads_dv() -> Self {
        Self {
            inertia: InertiaParams {
                mass: 350.0,
                i_z: 400.0,
                gravity: GRAVITY,
            },
            kinematic: KinematicParams {
                l_f: 0.80,
                l_r: 0.78,
                track_width: 1.4,
            },
            tire: TireParams {
                b_front: 12.56,
                b_rear: 12.56,
                c: 1.38,
                d: 1.6,
                e: -0.58,
                radius: 0.2525,
            },
            aero: AeroParams {
                c_drag: 0.8,
                c_down_front: 0.9,
                c_down_rear: 1.1,
                area: 1.0,
                air_density: AIR_DENSITY,
            },
            input_ranges: InputRanges {
                acc_min: -8.0,
                acc_max: 4.0,
                delta_max: 0.27,
                vel_max: 20.0,
            },
            blend: BlendParams {
                v_min: 1.5,
                v_band: 2.0,
            },
        }
    }

    /// Build parameters from a flat key/value map. Every key is required.
    pub fn from_map(map: &ParamMap) -> Result<Self, ParamError> {
        let param = Self {
            inertia: InertiaParams {
                mass: map.require("inertia.mass")?,
                i_z: map.require("inertia.i_z")?,
                gravity: map.require("inertia.gravity")?,
            },
            kinematic: KinematicParams {
                l_f: map.require("kinematics.l_f")?,
                l_r: map.require("kinematics.l_r")?,
                track_width: map.require("kinematics.track_width")?,
            },
            tire: TireParams {
                b_front: map.require("tire.b_front")?,
                b_rear: map.require("tire.b_rear")?,
                c: map.require("tire.c")?,
                d: map.require("tire.d")?,
                e: map.require("tire.e")?,
                radius: map.require("tire.radius")?,
            },
            aero: AeroParams {
                c_drag: map.require("aero.c_drag")?,
                c_down_front: map.require("aero.c_down_front")?,
                c_down_rear: map.require("aero.c_down_rear")?,
                area: map.require("aero.area")?,
                air_density: map.require("aero.air_density")?,
            },
            input_ranges: InputRanges {
                acc_min: map.require("input_ranges.acc_min")?,
                acc_max: map.require("input_ranges.acc_max")?,
                delta_max: map.require("input_ranges.delta_max")?,
                vel_max: map.require("input_ranges.vel_max")?,
            },
            blend: BlendParams {
                v_min: map.require("blend.v_min")?,
                v_band: map.require("blend.v_band")?,
            },
        };
        param.validate()?;
        Ok(param)
    }

    /// Flatten back into the key/value form accepted by [`Param::from_map`].
    pub fn to_map(&self) -> ParamMap {
        ParamMap::from_pairs([
            ("inertia.mass", self.inertia.mass),
            ("inertia.i_z", self.inertia.i_z),
            ("inertia.gravity", self.inertia.gravity),
            ("kinematics.l_f", self.kinematic.l_f),
            ("kinematics.l_r", self.kinematic.l_r),
            ("kinematics.track_width", self.kinematic.track_width),
            ("tire.b_front", self.tire.b_front),
            ("tire.b_rear", self.tire.b_rear),
            ("tire.c", self.tire.c),
            ("tire.d", self.tire.d),
            ("tire.e", self.tire.e),
            ("tire.radius", self.tire.radius),
            ("aero.c_drag", self.aero.c_drag),
            ("aero.c_down_front", self.aero.c_down_front),
            ("aero.c_down_rear", self.aero.c_down_rear),
            ("aero.area", self.aero.area),
            ("aero.air_density", self.aero.air_density),
            ("input_ranges.acc_min", self.input_ranges.acc_min),
            ("input_ranges.acc_max", self.input_ranges.acc_max),
            ("input_ranges.delta_max", self.input_ranges.delta_max),
            ("input_ranges.vel_max", self.input_ranges.vel_max),
            ("blend.v_min", self.blend.v_min),
            ("blend.v_band", self.blend.v_band),
        ])
    }

    /// Reject physically meaningless parameter sets.
    pub fn validate(&self) -> Result<(), ParamError> {
        positive("inertia.mass", self.inertia.mass)?;
        positive("inertia.i_z", self.inertia.i_z)?;
        positive("inertia.gravity", self.inertia.gravity)?;

        positive("kinematics.l_f", self.kinematic.l_f)?;
        positive("kinematics.l_r", self.kinematic.l_r)?;
        non_negative("kinematics.track_width", self.kinematic.track_width)?;

        positive("tire.b_front", self.tire.b_front)?;
        positive("tire.b_rear", self.tire.b_rear)?;
        positive("tire.c", self.tire.c)?;
        positive("tire.d", self.tire.d)?;
        finite("tire.e", self.tire.e)?;
        if self.tire.e >= 1.0 {
            return Err(ParamError::invalid("tire.e", "curvature factor must be below 1"));
        }
        positive("tire.radius", self.tire.radius)?;

        non_negative("aero.c_drag", self.aero.c_drag)?;
        non_negative("aero.c_down_front", self.aero.c_down_front)?;
        non_negative("aero.c_down_rear", self.aero.c_down_rear)?;
        non_negative("aero.area", self.aero.area)?;
        non_negative("aero.air_density", self.aero.air_density)?;

        finite("input_ranges.acc_min", self.input_ranges.acc_min)?;
        finite("input_ranges.acc_max", self.input_ranges.acc_max)?;
        if self.input_ranges.acc_min > 0.0 || self.input_ranges.acc_max < 0.0 {
            return Err(ParamError::invalid(
                "input_ranges.acc_min",
                "acceleration range must contain zero",
            ));
        }
        positive("input_ranges.delta_max", self.input_ranges.delta_max)?;
        if self.input_ranges.delta_max >= FRAC_PI_2 {
            return Err(ParamError::invalid(
                "input_ranges.delta_max",
                "steering limit must be below 90 degrees",
            ));
        }
        positive("input_ranges.vel_max", self.input_ranges.vel_max)?;

        non_negative("blend.v_min", self.blend.v_min)?;
        positive("blend.v_band", self.blend.v_band)?;
        Ok(())
    }
}

fn finite(key: &str, value: f64) -> Result<(), ParamError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ParamError::invalid(key, "value must be finite"))
    }
}

fn positive(key: &str, value: f64) -> Result<(), ParamError> {
    finite(key, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ParamError::invalid(key, format!("must be positive, got {value}")))
    }
}

fn non_negative(key: &str, value: f64) -> Result<(), ParamError> {
    finite(key, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ParamError::invalid(key, format!("must not be negative, got {value}")))
    }
}
