//! Named → positional placeholder binding.
//!
//! Statements are built with `:name` placeholders; Postgres wants `$1, $2, ...`.
//! [`bind_named`] rewrites the text and produces the argument list in the same
//! order. A list value expands into one placeholder per element, so
//! `id IN (:cond_id)` with `[7, 8, 9]` becomes `id IN ($1, $2, $3)`.
//!
//! Scanning rules:
//! - `::` is a type cast, not a placeholder.
//! - Nothing inside `'...'` literals or `"..."` identifiers is rewritten.
//! - A name used twice reuses the positions of its first occurrence.
//! - Bind entries the text never references are ignored.

use crate::error::{SqlError, SqlResult};
use crate::value::{Binds, Scalar, Value};
use std::collections::HashMap;
use tokio_postgres::types::ToSql;

/// Positional statement text and its ordered arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundStatement {
    pub sql: String,
    pub args: Vec<Scalar>,
}

impl BoundStatement {
    /// Parameter refs compatible with `tokio-postgres`.
    pub fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.args.iter().map(|a| a as &(dyn ToSql + Sync)).collect()
    }
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn render(value: &Value, args: &mut Vec<Scalar>) -> String {
    let items: &[Scalar] = match value {
        Value::Scalar(s) => std::slice::from_ref(s),
        Value::List(items) if items.is_empty() => return "NULL".to_string(),
        Value::List(items) => items,
    };
    let mut out = String::new();
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        args.push(item.clone());
        out.push('$');
        out.push_str(&args.len().to_string());
    }
    out
}

/// Resolve `:name` placeholders in `sql` against `binds`.
///
/// Fails with [`SqlError::UnresolvedPlaceholder`] when a referenced name has
/// no bind entry.
pub fn bind_named(sql: &str, binds: &Binds) -> SqlResult<BoundStatement> {
    let bytes = sql.as_bytes();
    let mut out = String::with_capacity(sql.len());
    let mut args = Vec::new();
    let mut assigned: HashMap<&str, String> = HashMap::new();

    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            quote @ (b'\'' | b'"') => {
                let end = sql[i + 1..]
                    .find(quote as char)
                    .map_or(bytes.len(), |p| i + 1 + p + 1);
                out.push_str(&sql[i..end]);
                i = end;
            }
            b':' if bytes.get(i + 1) == Some(&b':') => {
                out.push_str("::");
                i += 2;
            }
            b':' => {
                let start = i + 1;
                let len = bytes[start..].iter().take_while(|b| is_name_byte(**b)).count();
                if len == 0 {
                    out.push(':');
                    i += 1;
                    continue;
                }
                let name = &sql[start..start + len];
                match assigned.get(name) {
                    Some(rendered) => out.push_str(rendered),
                    None => {
                        let value = binds
                            .get(name)
                            .ok_or_else(|| SqlError::UnresolvedPlaceholder(name.to_string()))?;
                        let rendered = render(value, &mut args);
                        out.push_str(&rendered);
                        assigned.insert(name, rendered);
                    }
                }
                i = start + len;
            }
            _ => {
                let end = sql[i..]
                    .find(['\'', '"', ':'])
                    .map_or(bytes.len(), |p| i + p);
                out.push_str(&sql[i..end]);
                i = end;
            }
        }
    }

    tracing::trace!(
        target: "bulksql::bind",
        names = assigned.len(),
        args = args.len(),
        "bound named statement"
    );
    Ok(BoundStatement { sql: out, args })
}
