use std::io;
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum CorrectionError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Geometry parse error at line {line}: {message}")]
    GeometryParse { line: usize, message: String },

    #[error("Geometry file contains no inlet faces")]
    EmptyGeometry,

    #[error("Inlet patch has zero streamwise area")]
    ZeroInletArea,

    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("Bulk velocity at time index {time_index} is {value}, cannot rescale")]
    ZeroBulkVelocity { time_index: usize, value: f64 },

    #[error(
        "Corrected bulk velocity at time index {time_index} is {actual}, expected {expected}"
    )]
    Verification {
        time_index: usize,
        expected: f64,
        actual: f64,
    },

    #[error("Storage error: {0}")]
    Storage(String),

    #[cfg(feature = "hdf5")]
    #[error("HDF5 error: {0}")]
    Hdf5(#[from] hdf5::Error),

    #[error("Serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CorrectionError>;
