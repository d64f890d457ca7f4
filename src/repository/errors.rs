use diesel::r2d2::PoolError;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

/// Failures coming out of the repository layer.
///
/// The database traffic here is listing reads and single-row CRUD, so the
/// diesel error surface collapses to the cases the services branch on: a
/// missing row, a rejected write (duplicate email or username, broken
/// foreign key) and everything else.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The requested row does not exist.
    #[error("not found")]
    NotFound,

    /// A UNIQUE, FOREIGN KEY, NOT NULL or CHECK constraint rejected the
    /// write. Carries the SQLite message for the log.
    #[error("constraint violated: {0}")]
    Constraint(String),

    /// No connection could be drawn from the pool.
    #[error("database unavailable: {0}")]
    Pool(String),

    /// Any other database failure.
    #[error("database error: {0}")]
    Database(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl From<DieselError> for RepositoryError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => RepositoryError::NotFound,
            DieselError::DatabaseError(
                DatabaseErrorKind::UniqueViolation
                | DatabaseErrorKind::ForeignKeyViolation
                | DatabaseErrorKind::NotNullViolation
                | DatabaseErrorKind::CheckViolation,
                info,
            ) => RepositoryError::Constraint(info.message().to_string()),
            other => RepositoryError::Database(other.to_string()),
        }
    }
}

impl From<PoolError> for RepositoryError {
    fn from(err: PoolError) -> Self {
        RepositoryError::Pool(err.to_string())
    }
}
