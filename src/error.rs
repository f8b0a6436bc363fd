use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// The shape of an argument cannot be represented as a cluster object.
    #[error("{0}")]
    InvalidArgument(String),

    /// A business rule was violated, e.g. a custom annotation shadowing a reserved key.
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

impl Error {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }

    /// Determine if this error was caused by the caller's input rather than by the environment
    pub fn is_rejection(&self) -> bool {
        matches!(self, Error::InvalidArgument(_) | Error::Validation(_))
    }
}
