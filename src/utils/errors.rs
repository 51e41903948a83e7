use std::io;
use thiserror::Error;

use crate::config::ParamError;
use crate::physics::ModelError;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Config error: {0}")]
    InvalidConfig(String),

    #[error("Parameter error: {0}")]
    Param(#[from] ParamError),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_yaml::Error),

    #[error("Output error: {0}")]
    OutputError(#[from] serde_json::Error),
}
