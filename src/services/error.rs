use thiserror::Error;

use crate::repos::RepoError;
use crate::services::validation::ValidationError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error(transparent)]
    Store(#[from] RepoError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
