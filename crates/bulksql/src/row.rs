//! Row mapping traits

use crate::error::{SqlError, SqlResult};
use tokio_postgres::Row;

/// Trait for converting a database row into a Rust type.
///
/// Usually derived with `#[derive(FromRow)]`; each field reads the column
/// named by `#[orm(db = "...")]` (or `#[orm(column = "...")]`), falling back
/// to the field name.
///
/// # Example
///
/// ```ignore
/// use bulksql::FromRow;
///
/// #[derive(FromRow)]
/// struct Product {
///     id: i64,
///     #[orm(db = "sku")]
///     code: String,
///     description: Option<String>,
/// }
/// ```
pub trait FromRow: Sized {
    /// Convert a database row into Self
    fn from_row(row: &Row) -> SqlResult<Self>;
}

/// Extension trait for Row to provide typed access
pub trait RowExt {
    /// Try to get a column value, returning SqlError::Decode on failure
    fn try_get_column<T>(&self, column: &str) -> SqlResult<T>
    where
        T: for<'a> tokio_postgres::types::FromSql<'a>;
}

impl RowExt for Row {
    fn try_get_column<T>(&self, column: &str) -> SqlResult<T>
    where
        T: for<'a> tokio_postgres::types::FromSql<'a>,
    {
        self.try_get(column)
            .map_err(|e| SqlError::decode(column, e.to_string()))
    }
}

/// Read the single `COUNT(*)` column of a row.
pub(crate) fn count_from_row(row: &Row) -> SqlResult<i64> {
    row.try_get::<_, i64>(0)
        .map_err(|e| SqlError::decode("count", e.to_string()))
}
