use sqlx::error::ErrorKind;
use thiserror::Error;

/// Storage failures, classified by the constraint they violated.
#[derive(Error, Debug)]
pub enum DbError {
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("foreign key constraint violated: {0}")]
    ForeignKeyViolation(String),

    #[error("migration {module}/{id} failed: {source}")]
    Migration {
        module: String,
        id: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("database error: {0}")]
    Sqlx(sqlx::Error),
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        let kind = match &err {
            sqlx::Error::Database(db_err) => Some((db_err.kind(), db_err.message().to_string())),
            _ => None,
        };

        match kind {
            Some((ErrorKind::UniqueViolation, message)) => DbError::UniqueViolation(message),
            Some((ErrorKind::ForeignKeyViolation, message)) => DbError::ForeignKeyViolation(message),
            _ => DbError::Sqlx(err),
        }
    }
}

pub type Result<T> = std::result::Result<T, DbError>;
