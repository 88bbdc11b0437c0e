//! Error types for tsqlb

use thiserror::Error;

/// Result type alias for statement construction.
pub type BuildResult<T> = Result<T, BuildError>;

/// Errors raised while assembling a statement.
///
/// Every variant is a construction-time failure: nothing is rendered once one
/// of these has been recorded, and the caller has to start a fresh builder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// SELECT with an empty select list
    #[error("No columns were selected")]
    EmptySelection,

    /// SELECT without a main table
    #[error("No main table was registered (call `from` first)")]
    MissingFrom,

    /// INSERT without rows, or with no column to insert into
    #[error("No rows were supplied for insertion")]
    EmptyInsert,

    /// A value that has no SQL literal form
    #[error("Unsupported literal value: {0}")]
    UnsupportedValue(String),

    /// A single-value clause registered twice
    #[error("The '{0}' clause was already registered for this statement")]
    ClauseAlreadySet(&'static str),

    /// Table alias not declared in the statement source
    #[error("Unknown table alias '{0}'")]
    UnknownTable(String),

    /// OFFSET/FETCH without ORDER BY
    #[error("OFFSET/FETCH requires an ORDER BY clause")]
    OffsetWithoutOrderBy,

    /// TOP combined with OFFSET/FETCH
    #[error("TOP cannot be combined with OFFSET/FETCH")]
    TopWithOffset,

    /// INSERT row carrying a column outside the column list
    #[error("Insert row {row} has column '{column}' which is not in the column list")]
    InsertColumnMismatch { row: usize, column: String },
}

impl BuildError {
    /// Create an unsupported-value error
    pub fn unsupported_value(message: impl Into<String>) -> Self {
        Self::UnsupportedValue(message.into())
    }

    /// Check if this is an unsupported-value error
    pub fn is_unsupported_value(&self) -> bool {
        matches!(self, Self::UnsupportedValue(_))
    }

    /// Check if this error comes from registering a clause twice
    pub fn is_clause_already_set(&self) -> bool {
        matches!(self, Self::ClauseAlreadySet(_))
    }
}
