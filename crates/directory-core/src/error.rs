//! Error types for directory operations

use thiserror::Error;

use crate::types::PersonId;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("Person not found: {0}")]
    PersonNotFound(PersonId),

    #[error("Person already registered: {0}")]
    DuplicatePerson(PersonId),
}

pub type Result<T> = std::result::Result<T, DirectoryError>;
