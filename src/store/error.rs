use thiserror::Error;

/// Failure of the underlying store call itself.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Row not found in {table}: {id}")]
    NotFound { table: String, id: String },

    #[error("Row already exists in {table}: {id}")]
    AlreadyExists { table: String, id: String },

    #[error("Invalid row for {table}: {reason}")]
    InvalidRow { table: String, reason: String },
}

impl StoreError {
    pub fn not_found(table: &str, id: &str) -> Self {
        StoreError::NotFound {
            table: table.to_string(),
            id: id.to_string(),
        }
    }

    pub fn invalid_row(table: &str, reason: impl Into<String>) -> Self {
        StoreError::InvalidRow {
            table: table.to_string(),
            reason: reason.into(),
        }
    }

    /// Whether this error means the referenced row does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}
