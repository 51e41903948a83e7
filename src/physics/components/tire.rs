use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::TireParams;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axle {
    Front,
    Rear,
}

impl Axle {
    pub fn is_front(&self) -> bool {
        matches!(self, Axle::Front)
    }
}

impl fmt::Display for Axle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Axle::Front => "front",
            Axle::Rear => "rear",
        };
        write!(f, "{s}")
    }
}

fn stiffness_factor(tire: &TireParams, axle: Axle) -> f64 {
    match axle {
        Axle::Front => tire.b_front,
        Axle::Rear => tire.b_rear,
    }
}

/// Lateral force of a single tire (N) from its normal load `fz` (N) and slip
/// angle `alpha` (rad), using the simplified magic formula
///
/// `Fy = D·Fz·sin(C·atan(Bα − E·(Bα − atan(Bα))))`
///
/// Linear in `alpha` for small slip with slope [`cornering_stiffness`],
/// bounded by `D·Fz` for large slip. Odd in `alpha`.
pub fn lateral_force(tire: &TireParams, axle: Axle, fz: f64, alpha: f64) -> f64 {
    let b_alpha = stiffness_factor(tire, axle) * alpha;
    let shaped = b_alpha - tire.e * (b_alpha - b_alpha.atan());
    let mu_y = tire.d * (tire.c * shaped.atan()).sin();
    mu_y * fz.max(0.0)
}

/// Small-slip slope `dFy/dα` of one tire under load `fz` (N/rad).
pub fn cornering_stiffness(tire: &TireParams, axle: Axle, fz: f64) -> f64 {
    stiffness_factor(tire, axle) * tire.c * tire.d * fz.max(0.0)
}
