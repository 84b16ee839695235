use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Why a write could not be committed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommitError {
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),
    #[error("foreign key constraint violated: {0}")]
    ForeignKeyViolation(String),
    #[error("connection failure: {0}")]
    Connection(String),
    #[error("{0}")]
    Other(String),
}

impl From<DbErr> for CommitError {
    fn from(e: DbErr) -> Self {
        match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => return Self::UniqueViolation(msg),
            Some(SqlErr::ForeignKeyConstraintViolation(msg)) => return Self::ForeignKeyViolation(msg),
            _ => {}
        }
        match e {
            DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => Self::Connection(e.to_string()),
            other => Self::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeyFormatError {
    #[error("composite primary key has no parts")]
    Empty,
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{entity} not found: {key}")]
    NotFound { entity: String, key: String },
    #[error("commit failed: {0}")]
    CommitFailed(#[from] CommitError),
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("invalid primary key: {0}")]
    InvalidKey(#[from] KeyFormatError),
    #[error("database error: {0}")]
    Db(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn not_found(entity: impl Into<String>, key: impl Into<String>) -> Self {
        Self::NotFound { entity: entity.into(), key: key.into() }
    }

    pub(crate) fn db(e: DbErr) -> Self {
        Self::Db(e.to_string())
    }

    pub(crate) fn unavailable(e: DbErr) -> Self {
        Self::Unavailable(e.to_string())
    }

    pub(crate) fn commit(e: DbErr) -> Self {
        Self::CommitFailed(CommitError::from(e))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_commit_failed(&self) -> bool {
        matches!(self, Self::CommitFailed(_))
    }
}
