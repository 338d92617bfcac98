//! Convenient imports for typical `bulksql` usage.
//!
//! ```ignore
//! use bulksql::prelude::*;
//! ```

pub use crate::{
    Binds, BuiltStatement, Describe, FieldDesc, FromRow, GenericClient, Page, Paginate,
    RepoConfig, Repository, RowExt, SqlError, SqlResult, StatementBuilder, TransactionClient,
    UpdateItem, Value,
};

#[cfg(feature = "pool")]
pub use crate::{create_pool, create_pool_with_config};
