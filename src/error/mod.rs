//! Error types for clock construction, stimulus validation and run configuration.

use thiserror::Error;


/// Error set for invalid simulation clocks
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClockError {
    /// Timestep must be finite and greater than zero
    #[error("Timestep must be finite and positive, got {0}")]
    InvalidTimestep(f64),
    /// Total time must be finite and non-negative
    #[error("Total time must be finite and non-negative, got {0}")]
    InvalidTotalTime(f64),
    /// A clock needs at least one point
    #[error("Point count must be at least 1")]
    EmptyClock,
}

/// Error set for stimulus series that cannot drive a run
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StimulusError {
    /// Stimulus length does not match the clock's point count
    #[error("Stimulus has {actual} values but the clock has {expected} points")]
    LengthMismatch { expected: usize, actual: usize },
}

/// Error set for run configuration files
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Field is present but has the wrong type
    #[error("Cannot parse '{field}' as {expected}")]
    InvalidType { field: String, expected: &'static str },
    /// Both `iterations` and `total_time` were given
    #[error("Cannot have both 'iterations' and 'total_time' argument")]
    ConflictingDuration,
    /// Neither `iterations` nor `total_time` were given
    #[error("Missing 'iterations' or 'total_time' argument")]
    MissingDuration,
    /// Unknown stimulus kind
    #[error("Unknown stimulus type '{0}'")]
    UnknownStimulus(String),
    /// Unknown Izhikevich preset name
    #[error("Unknown Izhikevich preset '{0}'")]
    UnknownPreset(String),
    /// Document is not valid TOML
    #[error("Cannot read config: {0}")]
    Syntax(String),
}

/// A set of errors that may occur when using the library
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Errors related to the simulation clock
    #[error(transparent)]
    ClockRelatedError(#[from] ClockError),
    /// Errors related to stimulus series
    #[error(transparent)]
    StimulusRelatedError(#[from] StimulusError),
    /// Errors related to configuration parsing
    #[error(transparent)]
    ConfigRelatedError(#[from] ConfigError),
    /// Errors while reading configs or writing traces
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Errors while writing csv output
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
