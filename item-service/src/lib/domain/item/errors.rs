use thiserror::Error;

/// Error for ItemName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ItemNameError {
    #[error("Item name must not be empty")]
    Empty,

    #[error("Item name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error for all item-related operations
#[derive(Debug, Clone, Error)]
pub enum ItemError {
    #[error("Invalid item name: {0}")]
    InvalidName(#[from] ItemNameError),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
