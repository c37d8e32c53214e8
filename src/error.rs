// ABOUTME: Centralized error type for the records layer with domain-level variants
// ABOUTME: Translates storage constraint violations into domain errors instead of leaking driver errors

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Authentication failed for @{0}")]
    Authentication(String),

    #[error("Already signed in as @{0}")]
    AlreadySignedIn(String),

    #[error("Not signed in")]
    NotAuthenticated,

    #[error("User @{login} does not have the {role} role")]
    Authorization { login: String, role: &'static str },

    #[error("{entity} {name:?} already exists")]
    DuplicateName { entity: &'static str, name: String },

    #[error("Log category {0:?} not found")]
    CategoryNotFound(String),

    #[error("Moving {node} under {parent} would create a cycle")]
    Cycle { node: Uuid, parent: Uuid },

    #[error("Cannot assign a {found} record to the {slot} slot")]
    TypeMismatch {
        slot: &'static str,
        found: &'static str,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid parameter value: {0}")]
    InvalidValue(String),

    #[error("Malformed parameter value: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Password hashing error: {0}")]
    Crypto(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl Error {
    /// Maps a failed write to `DuplicateName` when the engine reports a
    /// uniqueness violation, and passes every other failure through.
    pub fn from_write(err: DbErr, entity: &'static str, name: impl Into<String>) -> Self {
        if is_unique_violation(&err) {
            tracing::info!("Rejected duplicate {}: {}", entity, err);
            Error::DuplicateName {
                entity,
                name: name.into(),
            }
        } else {
            tracing::error!("Write of {} failed: {}", entity, err);
            Error::Database(err)
        }
    }
}

pub fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

impl From<argon2::password_hash::Error> for Error {
    fn from(err: argon2::password_hash::Error) -> Self {
        Error::Crypto(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
