use super::{BuiltStatement, StatementBuilder, finish};
use crate::condition::build_condition;
use crate::describe::Describe;
use crate::error::{SqlError, SqlResult};
use crate::ident::validate_select_field;
use crate::paginate::Paginate;
use crate::value::{Binds, Value};

pub(crate) const PAGINATE_LIMIT_KEY: &str = "paginate_limit";
pub(crate) const PAGINATE_OFFSET_KEY: &str = "paginate_offset";

impl StatementBuilder<'_> {
    /// `SELECT {fields} FROM {table} [WHERE ...] [LIMIT :paginate_limit OFFSET :paginate_offset]`.
    ///
    /// Fields are emitted in sorted order. An absent or empty condition means
    /// no filter.
    pub fn select<C, S>(
        &self,
        fields: &[S],
        condition: Option<&C>,
        paginate: Option<&Paginate>,
    ) -> SqlResult<BuiltStatement>
    where
        C: Describe + ?Sized,
        S: AsRef<str>,
    {
        if fields.is_empty() {
            return Err(SqlError::EmptyFieldList);
        }
        let table = self.table()?;

        let mut names = fields
            .iter()
            .map(|f| validate_select_field(f.as_ref()))
            .collect::<SqlResult<Vec<_>>>()?;
        names.sort_unstable();

        let mut sql = format!("SELECT {} FROM {table}", names.join(", "));
        let mut binds = self.push_where(&mut sql, condition)?;

        if let Some(p) = paginate {
            sql.push_str(" LIMIT :");
            sql.push_str(PAGINATE_LIMIT_KEY);
            sql.push_str(" OFFSET :");
            sql.push_str(PAGINATE_OFFSET_KEY);
            binds.insert(PAGINATE_LIMIT_KEY.to_string(), Value::from(p.limit));
            binds.insert(PAGINATE_OFFSET_KEY.to_string(), Value::from(p.offset()));
        }

        Ok(finish("SELECT", table, sql, binds))
    }

    /// `SELECT COUNT(*) FROM {table} [WHERE ...]`.
    pub fn count<C>(&self, condition: Option<&C>) -> SqlResult<BuiltStatement>
    where
        C: Describe + ?Sized,
    {
        let table = self.table()?;
        let mut sql = format!("SELECT COUNT(*) FROM {table}");
        let binds = self.push_where(&mut sql, condition)?;
        Ok(finish("COUNT", table, sql, binds))
    }

    fn push_where<C>(&self, sql: &mut String, condition: Option<&C>) -> SqlResult<Binds>
    where
        C: Describe + ?Sized,
    {
        let Some(condition) = condition else {
            return Ok(Binds::new());
        };
        let fragment = build_condition(condition, self.scheme, "")?;
        if fragment.is_empty() {
            return Ok(Binds::new());
        }
        let (where_sql, binds) = fragment.into_parts();
        sql.push_str(" WHERE ");
        sql.push_str(&where_sql);
        Ok(binds)
    }
}
