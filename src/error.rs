//! Error types for VahanaBase

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// VahanaBase error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration parse error
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration serialize error
    #[error("Config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// Unknown chassis driver type
    #[error("Unknown driver type: {0}")]
    UnknownDriver(String),

    /// Component not available
    #[error("Component not available: {0}")]
    ComponentNotAvailable(&'static str),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}
