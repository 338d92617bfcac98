//! Statement builders.
//!
//! [`StatementBuilder`] turns descriptors into named-parameter SQL for one
//! table. Every builder returns a [`BuiltStatement`]: the statement text with
//! `:name` placeholders and the bind map those placeholders refer to.
//!
//! ## Design
//!
//! - Only present fields take part (sparse INSERT / UPDATE).
//! - Output is deterministic: fields are always emitted in lexicographic order.
//! - Safe defaults: UPDATE and DELETE require a non-empty condition.
//! - Values are never interpolated; only validated identifiers are.
//!
//! ```ignore
//! let stmt = StatementBuilder::new("products").update(&payload, &condition)?;
//! assert_eq!(stmt.sql, "UPDATE products SET name=:val_name WHERE sku=:cond_sku");
//! ```

mod bulk;
mod delete;
mod insert;
mod select;
mod update;

pub use bulk::{UpdateItem, script_statements};


use crate::bind::{BoundStatement, bind_named};
use crate::describe::DEFAULT_SCHEME;
use crate::error::SqlResult;
use crate::ident::validate_table;
use crate::value::Binds;

/// Statement text with named placeholders, plus its bind map.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltStatement {
    pub sql: String,
    pub binds: Binds,
}

impl BuiltStatement {
    pub fn new(sql: String, binds: Binds) -> Self {
        Self { sql, binds }
    }

    /// Resolve named placeholders into positional ones.
    pub fn bind(&self) -> SqlResult<BoundStatement> {
        bind_named(&self.sql, &self.binds)
    }

    pub fn into_parts(self) -> (String, Binds) {
        (self.sql, self.binds)
    }
}

/// Builds statements for a single table.
#[derive(Debug, Clone, Copy)]
pub struct StatementBuilder<'a> {
    table: &'a str,
    scheme: &'a str,
}

impl<'a> StatementBuilder<'a> {
    /// Create a builder for `table` using the default `db` naming scheme.
    pub fn new(table: &'a str) -> Self {
        Self {
            table,
            scheme: DEFAULT_SCHEME,
        }
    }

    /// Use another naming scheme to resolve wire names.
    pub fn scheme(mut self, scheme: &'a str) -> Self {
        self.scheme = scheme;
        self
    }

    fn table(&self) -> SqlResult<&'a str> {
        validate_table(self.table)
    }
}

fn finish(kind: &'static str, table: &str, sql: String, binds: Binds) -> BuiltStatement {
    tracing::debug!(
        target: "bulksql::builder",
        kind,
        table,
        bind_count = binds.len(),
        "built statement"
    );
    BuiltStatement::new(sql, binds)
}
