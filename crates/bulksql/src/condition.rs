//! WHERE-clause fragments built from condition descriptors.
//!
//! Each present field becomes one clause, in lexicographic wire-name order,
//! joined by `AND`:
//!
//! - scalar value: `name=:cond_name`
//! - non-empty list: `name IN (:cond_name)`
//! - empty list: no clause at all (same as an unset field)

use crate::describe::{Describe, extract_fields};
use crate::error::SqlResult;
use crate::ident::validate_bind_prefix;
use crate::value::{Binds, Value};
use std::fmt;

/// Which clause a bind key belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindRole {
    /// SET-clause value
    Val,
    /// WHERE-clause value
    Cond,
}

impl BindRole {
    pub fn as_str(self) -> &'static str {
        match self {
            BindRole::Val => "val",
            BindRole::Cond => "cond",
        }
    }
}

/// Compose a bind key: `{prefix}{role}_{name}`.
pub fn bind_key(prefix: &str, role: BindRole, name: &str) -> String {
    let role = role.as_str();
    let mut key = String::with_capacity(prefix.len() + role.len() + 1 + name.len());
    key.push_str(prefix);
    key.push_str(role);
    key.push('_');
    key.push_str(name);
    key
}

/// Bind-key prefix for batch position `index`: `idx{index}_`.
pub fn batch_prefix(index: usize) -> String {
    format!("idx{index}_")
}

/// One term of a condition fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    /// `column=:key`
    Equality { column: String, key: String },
    /// `column IN (:key)`
    MembershipInList { column: String, key: String },
}

impl Clause {
    pub fn column(&self) -> &str {
        match self {
            Clause::Equality { column, .. } | Clause::MembershipInList { column, .. } => column,
        }
    }

    pub fn key(&self) -> &str {
        match self {
            Clause::Equality { key, .. } | Clause::MembershipInList { key, .. } => key,
        }
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Clause::Equality { column, key } => write!(f, "{column}=:{key}"),
            Clause::MembershipInList { column, key } => write!(f, "{column} IN (:{key})"),
        }
    }
}

/// AND-joined clauses plus the binds they reference.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConditionFragment {
    clauses: Vec<Clause>,
    binds: Binds,
}

impl ConditionFragment {
    /// Whether the fragment has zero terms.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn binds(&self) -> &Binds {
        &self.binds
    }

    /// Render the clauses joined by ` AND `. Empty when there are no terms.
    pub fn to_sql(&self) -> String {
        let mut out = String::new();
        for (i, clause) in self.clauses.iter().enumerate() {
            if i > 0 {
                out.push_str(" AND ");
            }
            out.push_str(&clause.to_string());
        }
        out
    }

    pub fn into_parts(self) -> (String, Binds) {
        let sql = self.to_sql();
        (sql, self.binds)
    }
}

/// Build the WHERE fragment for `condition`, namespacing bind keys with `prefix`.
///
/// `prefix` must match `[A-Za-z0-9_]*` so the keys stay placeholder names.
pub fn build_condition<C: Describe + ?Sized>(
    condition: &C,
    scheme: &str,
    prefix: &str,
) -> SqlResult<ConditionFragment> {
    let prefix = validate_bind_prefix(prefix)?;
    let fields = extract_fields(condition, scheme)?;

    let mut fragment = ConditionFragment::default();
    for (column, value) in fields {
        if value.is_empty_list() {
            continue;
        }
        let key = bind_key(prefix, BindRole::Cond, &column);
        let clause = match &value {
            Value::List(_) => Clause::MembershipInList {
                column,
                key: key.clone(),
            },
            Value::Scalar(_) => Clause::Equality {
                column,
                key: key.clone(),
            },
        };
        fragment.clauses.push(clause);
        fragment.binds.insert(key, value);
    }
    Ok(fragment)
}
