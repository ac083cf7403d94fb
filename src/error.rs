use std::path::PathBuf;

use thiserror::Error;

/// Everything that can be wrong with a game configuration. All of it is
/// detected before the first frame runs.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config json at {path}: {message}")]
    Parse { path: String, message: String },
    #[error("level {0} is not defined")]
    UnknownLevel(u32),
    #[error("level {level}: monkey {index} has an empty route")]
    EmptyRoute { level: u32, index: usize },
    #[error("level {level}: monkey {index} has a non-positive route segment {segment}")]
    InvalidRouteSegment { level: u32, index: usize, segment: f64 },
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },
    #[error("{field} must be negative (upwards), got {value}")]
    NotUpward { field: &'static str, value: f64 },
}
