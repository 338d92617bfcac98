use super::{BuiltStatement, StatementBuilder, finish};
use crate::condition::build_condition;
use crate::describe::Describe;
use crate::error::{SqlError, SqlResult};

impl StatementBuilder<'_> {
    /// `DELETE FROM {table} WHERE ...`.
    ///
    /// There is no unscoped form: a condition with no terms fails with
    /// [`SqlError::EmptyCondition`].
    pub fn delete<C: Describe + ?Sized>(&self, condition: &C) -> SqlResult<BuiltStatement> {
        let table = self.table()?;
        let fragment = build_condition(condition, self.scheme, "")?;
        if fragment.is_empty() {
            return Err(SqlError::EmptyCondition("DELETE"));
        }
        let (where_sql, binds) = fragment.into_parts();
        let sql = format!("DELETE FROM {table} WHERE {where_sql}");
        Ok(finish("DELETE", table, sql, binds))
    }
}
