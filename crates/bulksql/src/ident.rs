//! SQL identifier checks.
//!
//! Table names, wire names, and requested select fields are written into
//! statement text rather than bound, so they are validated first:
//!
//! - wire names: `[A-Za-z_][A-Za-z0-9_]*`
//! - table names: one or more wire-name parts joined by `.` (`public.products`)
//! - select fields: `*`, a (dotted) identifier, or `alias.*`
//! - bind-key prefixes: empty or `[A-Za-z0-9_]*`
//!
//! Identifier parts must also avoid Postgres reserved keywords,
//! which cannot appear unquoted in those positions.

use crate::error::{SqlError, SqlResult};

/// Whether `s` is a single unquoted identifier that is also usable inside a
/// bind key.
pub fn is_simple_ident(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_ascii_alphabetic() || first == '_') {
        return false;
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Postgres keywords that are reserved in every position.
const RESERVED_KEYWORDS: &str = "all analyse analyze and any array as asc asymmetric both case \
    cast check collate column constraint create current_catalog current_date current_role \
    current_time current_timestamp current_user default deferrable desc distinct do else end \
    except false fetch for foreign from grant group having in initially intersect into lateral \
    leading limit localtime localtimestamp not null offset on only or order placing primary \
    references returning select session_user some symmetric system_user table then to \
    trailing true union unique user using variadic when where window with";

/// Whether `s` is a reserved keyword (case-insensitive).
pub fn is_reserved_keyword(s: &str) -> bool {
    RESERVED_KEYWORDS
        .split_ascii_whitespace()
        .any(|kw| kw.eq_ignore_ascii_case(s))
}

fn is_unreserved_ident(s: &str) -> bool {
    is_simple_ident(s) && !is_reserved_keyword(s)
}

fn is_dotted_ident(s: &str) -> bool {
    !s.is_empty() && s.split('.').all(is_unreserved_ident)
}

/// Validate a table name such as `products` or `inventory.products`.
pub fn validate_table(table: &str) -> SqlResult<&str> {
    let table = table.trim();
    if table.is_empty() {
        return Err(SqlError::validation("Table name cannot be empty"));
    }
    if !is_dotted_ident(table) {
        return Err(SqlError::validation(format!(
            "Invalid table name '{table}' (expected non-reserved [A-Za-z_][A-Za-z0-9_]* parts \
             joined by '.')"
        )));
    }
    Ok(table)
}

/// Validate one requested SELECT field.
pub fn validate_select_field(field: &str) -> SqlResult<&str> {
    let field = field.trim();
    let ok = field == "*"
        || match field.strip_suffix(".*") {
            Some(alias) => is_dotted_ident(alias),
            None => is_dotted_ident(field),
        };
    if !ok {
        return Err(SqlError::validation(format!(
            "Invalid select field '{field}'"
        )));
    }
    Ok(field)
}

/// Validate a bind-key prefix such as `idx3_`.
pub fn validate_bind_prefix(prefix: &str) -> SqlResult<&str> {
    if !prefix.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(SqlError::validation(format!(
            "Invalid bind-key prefix '{prefix}' (expected [A-Za-z0-9_]*)"
        )));
    }
    Ok(prefix)
}
