use thiserror::Error;

/// Errors raised by map generation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MapError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

pub type Result<T> = std::result::Result<T, MapError>;
