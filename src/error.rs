//! Error types for the gesture mouse control library.

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// `X11` window system operation failed
    #[error("X11 error: {0}")]
    X11(String),

    /// Pointer device operation failed
    #[error("Pointer device error: {0}")]
    PointerDevice(String),

    /// Smoothing stage initialization or processing error
    #[error("Filter error: {0}")]
    FilterError(String),

    /// Replay file parsing error
    #[error("Replay error: {0}")]
    ReplayError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Application-specific error type (alias for main Error type)
pub type AppError = Error;

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
