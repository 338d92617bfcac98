use super::{BuiltStatement, StatementBuilder, finish};
use crate::condition::{BindRole, bind_key, build_condition};
use crate::describe::{Describe, extract_fields};
use crate::error::{SqlError, SqlResult};

impl StatementBuilder<'_> {
    /// `UPDATE {table} SET a=:val_a, ... WHERE ...`.
    ///
    /// Only present payload fields are assigned. Fails with
    /// [`SqlError::EmptyCondition`] when the condition has no terms.
    pub fn update<P, C>(&self, payload: &P, condition: &C) -> SqlResult<BuiltStatement>
    where
        P: Describe + ?Sized,
        C: Describe + ?Sized,
    {
        self.update_with_prefix(payload, condition, "")
    }

    /// Same as [`update`](Self::update) with every bind key prefixed by `prefix`.
    pub fn update_with_prefix<P, C>(
        &self,
        payload: &P,
        condition: &C,
        prefix: &str,
    ) -> SqlResult<BuiltStatement>
    where
        P: Describe + ?Sized,
        C: Describe + ?Sized,
    {
        let table = self.table()?;
        let fields = extract_fields(payload, self.scheme)?;
        let fragment = build_condition(condition, self.scheme, prefix)?;
        if fragment.is_empty() {
            return Err(SqlError::EmptyCondition("UPDATE"));
        }
        if fields.is_empty() {
            return Err(SqlError::EmptyPayload("UPDATE"));
        }

        let (where_sql, mut binds) = fragment.into_parts();
        let mut assignments = Vec::with_capacity(fields.len());
        for (name, value) in fields {
            let key = bind_key(prefix, BindRole::Val, &name);
            assignments.push(format!("{name}=:{key}"));
            binds.insert(key, value);
        }

        let sql = format!(
            "UPDATE {table} SET {} WHERE {where_sql}",
            assignments.join(", ")
        );
        Ok(finish("UPDATE", table, sql, binds))
    }
}
