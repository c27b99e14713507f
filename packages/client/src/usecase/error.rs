//! UseCase layer error definitions.

use thiserror::Error;

use crate::domain::{ApiError, ValueObjectError};

/// Errors returned by use cases
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UseCaseError {
    /// No user has been installed in the store
    #[error("no user is signed in")]
    NoUser,

    /// The operation needs a matched room
    #[error("there is no active chat")]
    NoActiveMatch,

    #[error(transparent)]
    InvalidInput(#[from] ValueObjectError),

    #[error(transparent)]
    Api(#[from] ApiError),
}
