//! Error type shared by every catalog command

use shelf_kernel::MediatorError;
use thiserror::Error;

use crate::modules::books::{RepositoryError, ValueError};

#[derive(Debug, Error)]
pub enum AppError {
    /// Rejected user input
    #[error(transparent)]
    Validation(#[from] ValueError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Wiring bug: the command has no handler
    #[error(transparent)]
    Mediator(#[from] MediatorError),
}

impl AppError {
    /// The oid that was looked up and not found, if that is what failed
    pub fn not_found_oid(&self) -> Option<&str> {
        match self {
            AppError::Repository(RepositoryError::NotFound(oid)) => Some(oid),
            _ => None,
        }
    }
}
