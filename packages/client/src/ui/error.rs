//! UI layer error definitions.

use thiserror::Error;

use crate::{
    config::ConfigError,
    domain::{ApiError, PlatformError, ValueObjectError},
    usecase::UseCaseError,
};

/// Errors from route resolution
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouterError {
    #[error("no route matches path '{0}'")]
    NotFound(String),
}

/// Errors from terminal input
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TerminalError {
    #[error("failed to initialize terminal: {0}")]
    Init(String),

    #[error("terminal input failed: {0}")]
    Io(String),
}

/// Top-level application errors
#[derive(Debug, Error)]
pub enum AppError {
    /// A required part was not installed before `build`
    #[error("application is missing its {0}")]
    MissingPart(&'static str),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    InvalidInput(#[from] ValueObjectError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Router(#[from] RouterError),

    #[error(transparent)]
    Terminal(#[from] TerminalError),

    #[error(transparent)]
    UseCase(#[from] UseCaseError),
}
