use thiserror::Error;

#[derive(Debug, Error)]
pub enum NorthwindDbError {
    #[error(transparent)]
    SqliteError(#[from] rusqlite::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Parameter error: {0}")]
    ParameterError(String),

    #[error("SQL execution error: {0}")]
    ExecutionError(String),

    #[error("Other database error: {0}")]
    Other(String),
}

impl From<bb8::RunError<NorthwindDbError>> for NorthwindDbError {
    fn from(err: bb8::RunError<NorthwindDbError>) -> Self {
        match err {
            bb8::RunError::User(inner) => inner,
            bb8::RunError::TimedOut => {
                NorthwindDbError::ConnectionError("SQLite pool checkout timed out".into())
            }
        }
    }
}
