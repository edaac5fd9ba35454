/**
 * Responsibility
 * - the meaning a store failure carries to the layers above
 * - connectivity problems are kept apart from everything else so the HTTP
 *   layer can answer 503 instead of 500
 */
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("db error")]
    Db(#[from] sqlx::Error),
}

pub type RepoResult<T> = Result<T, RepoError>;

impl RepoError {
    pub fn from_sqlx(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_) => RepoError::Unavailable(e.to_string()),
            other => RepoError::Db(other),
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, RepoError::Unavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_timeouts_count_as_unavailable() {
        assert!(RepoError::from_sqlx(sqlx::Error::PoolTimedOut).is_unavailable());
        assert!(RepoError::from_sqlx(sqlx::Error::PoolClosed).is_unavailable());
    }

    #[test]
    fn row_not_found_is_a_plain_db_error() {
        let err = RepoError::from_sqlx(sqlx::Error::RowNotFound);
        assert!(!err.is_unavailable());
        assert!(matches!(err, RepoError::Db(sqlx::Error::RowNotFound)));
    }
}
