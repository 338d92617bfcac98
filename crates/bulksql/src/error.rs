//! Error types for bulksql

use thiserror::Error;

/// Result type alias for bulksql operations
pub type SqlResult<T> = Result<T, SqlError>;

/// Errors raised while building, binding, or executing statements.
#[derive(Debug, Error)]
pub enum SqlError {
    /// The descriptor could not be turned into a field map
    #[error("Invalid descriptor: {0}")]
    InvalidDescriptor(String),

    /// SELECT was requested without any field names
    #[error("Select requires at least one field")]
    EmptyFieldList,

    /// UPDATE/DELETE whose condition resolved to zero terms
    #[error("{0} requires a non-empty condition")]
    EmptyCondition(&'static str),

    /// INSERT/UPDATE without any present payload field
    #[error("{0} requires at least one payload field")]
    EmptyPayload(&'static str),

    /// A per-item failure surfaced through a composed builder
    #[error("Failed to build item {index}: {source}")]
    Build {
        index: usize,
        #[source]
        source: Box<SqlError>,
    },

    /// A `:name` placeholder with no entry in the bind map
    #[error("Unresolved placeholder :{0}")]
    UnresolvedPlaceholder(String),

    /// Identifier or argument validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Query execution error, carried unmodified from the backend
    #[error("Query error: {0}")]
    Query(#[from] tokio_postgres::Error),

    /// Row not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Row decode/mapping error
    #[error("Decode error on column '{column}': {message}")]
    Decode { column: String, message: String },

    /// Database connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// Pool error
    #[cfg(feature = "pool")]
    #[error("Pool error: {0}")]
    Pool(String),

    /// An error annotated by the calling layer
    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<SqlError>,
    },
}

impl SqlError {
    /// Create an invalid descriptor error
    pub fn invalid_descriptor(message: impl Into<String>) -> Self {
        Self::InvalidDescriptor(message.into())
    }

    /// Create a decode error for a specific column
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Wrap a per-item failure of a composed builder.
    pub fn build(index: usize, source: SqlError) -> Self {
        Self::Build {
            index,
            source: Box::new(source),
        }
    }

    /// Add context from the calling layer, keeping the original error as the source.
    pub fn context(self, context: impl Into<String>) -> Self {
        Self::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error beneath any `Build`/`Context` wrapping.
    pub fn root_cause(&self) -> &SqlError {
        match self {
            Self::Build { source, .. } | Self::Context { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Check if this (or the wrapped cause) is an empty condition error
    pub fn is_empty_condition(&self) -> bool {
        matches!(self.root_cause(), Self::EmptyCondition(_))
    }

    /// Check if this (or the wrapped cause) is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self.root_cause(), Self::NotFound(_))
    }

    /// The SQLSTATE reported by the server, if the root cause is a database error.
    pub fn sql_state(&self) -> Option<&tokio_postgres::error::SqlState> {
        match self.root_cause() {
            Self::Query(err) => err.code(),
            _ => None,
        }
    }
}

#[cfg(feature = "pool")]
impl From<deadpool_postgres::PoolError> for SqlError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        Self::Pool(err.to_string())
    }
}
