//! Errors raised while loading and building scenarios

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read scenario file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid scenario yaml")]
    Yaml(#[from] serde_yaml::Error),

    #[error("play area must have positive size, got {width} x {height}")]
    InvalidDimensions { width: f64, height: f64 },

    #[error("wall gap {wall_gap_width} does not leave room for a balloon in a play area {width} wide")]
    WallGapTooWide { wall_gap_width: f64, width: f64 },

    #[error("{balloon} balloon at ({x}, {y}) does not fit inside the play area")]
    BalloonOutOfBounds { balloon: String, x: f64, y: f64 },

    #[error("action at step {step} is scheduled after the last step ({steps})")]
    ActionBeyondRun { step: usize, steps: usize },

    #[error("parameter {name} = {value} is out of range")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("time step must be positive, got {0} ms")]
    NonPositiveTimeStep(f64),
}
