use thiserror::Error;

/// Errors that can occur when reading or writing account data.
///
/// Database failures are passed through untouched; callers see exactly what the
/// store reported.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A database error occurred (connectivity, constraint violation, bad statement).
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A stored value could not be mapped onto its domain type.
    #[error("Invalid value in column {column}: {value:?}")]
    InvalidColumn { column: &'static str, value: String },

    /// A row referenced a user that does not exist (in-memory store only;
    /// Postgres reports this as a foreign-key violation).
    #[error("Unknown user: {0}")]
    UnknownUser(String),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
