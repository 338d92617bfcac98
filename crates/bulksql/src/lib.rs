//! # bulksql
//!
//! Dynamic SQL statements from sparse Rust records, for Postgres.
//!
//! ## Features
//!
//! - **Sparse statements**: only the fields that are set take part in INSERT / UPDATE / WHERE
//! - **Deterministic output**: columns and terms are always emitted in sorted order
//! - **Safe defaults**: UPDATE and DELETE refuse an empty condition
//! - **Bulk updates**: many UPDATEs composed into one transaction with collision-free bind keys
//! - **Named parameters**: statements use `:name`, bound to `$1, $2, ...` with list expansion
//! - **Transaction-friendly**: pass a transaction anywhere a `GenericClient` is expected
//!
//! ## Example
//!
//! ```ignore
//! use bulksql::prelude::*;
//!
//! #[derive(Describe)]
//! struct ProductPayload {
//!     #[orm(db = "name")]
//!     name: Option<String>,
//!     #[orm(db = "price")]
//!     price: Option<f64>,
//! }
//!
//! #[derive(Describe)]
//! struct ProductCondition {
//!     #[orm(db = "id")]
//!     ids: Option<Vec<i64>>,
//! }
//!
//! let stmt = StatementBuilder::new("products").update(
//!     &ProductPayload { name: Some("Desk".into()), price: None },
//!     &ProductCondition { ids: Some(vec![1, 2]) },
//! )?;
//! assert_eq!(stmt.sql, "UPDATE products SET name=:val_name WHERE id IN (:cond_id)");
//!
//! let bound = stmt.bind()?;
//! assert_eq!(bound.sql, "UPDATE products SET name=$1 WHERE id IN ($2, $3)");
//! ```

pub mod bind;
pub mod builder;
pub mod client;
pub mod condition;
pub mod config;
pub mod describe;
pub mod error;
pub mod ident;
pub mod paginate;
pub mod repo;
pub mod row;
pub mod value;

pub mod prelude;

pub use bind::{BoundStatement, bind_named};
pub use builder::{BuiltStatement, StatementBuilder, UpdateItem, script_statements};
pub use client::{GenericClient, TransactionClient};
pub use condition::{BindRole, Clause, ConditionFragment, build_condition};
pub use config::RepoConfig;
pub use describe::{DEFAULT_SCHEME, Describe, FieldDesc, FieldMap, extract_fields};
pub use error::{SqlError, SqlResult};
pub use paginate::{DEFAULT_LIMIT, DEFAULT_PAGE, Page, Paginate};
pub use repo::Repository;
pub use row::{FromRow, RowExt};
pub use value::{Binds, FieldValue, Scalar, Value};

#[cfg(feature = "pool")]
pub mod pool;

#[cfg(feature = "pool")]
pub use pool::{create_pool, create_pool_with_config, create_pool_with_manager_config};

#[cfg(feature = "derive")]
pub use bulksql_derive::{Describe, FromRow};
