use crate::config::ParamError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    /// The tick is skipped and the caller keeps its previous state.
    #[error("Invalid timestep {0} s: must be positive and finite")]
    InvalidTimestep(f64),

    #[error("Model configuration error: {0}")]
    Param(#[from] ParamError),
}
