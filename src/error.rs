//! Error type for the configuration and rendering surfaces.
//!
//! The gate core itself has no failure modes; errors only arise when reading
//! configuration or writing audio files.

use std::path::PathBuf;

/// Errors raised while loading configuration or rendering.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A file could not be read or written.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration is not valid TOML or has the wrong shape.
    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// A parameter lies outside its panel range.
    #[error("{name} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// The sample rate must be positive.
    #[error("Sample rate must be greater than 0")]
    InvalidSampleRate,

    /// The render duration must be finite and non-negative.
    #[error("Duration must be a finite, non-negative number of seconds, got {0}")]
    InvalidDuration(f64),

    /// Writing the WAV file failed.
    #[cfg(feature = "render")]
    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
