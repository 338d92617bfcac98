use super::{BuiltStatement, StatementBuilder, finish};
use crate::condition::batch_prefix;
use crate::describe::{Describe, FieldMap, extract_fields};
use crate::error::{SqlError, SqlResult};
use crate::value::Binds;

impl StatementBuilder<'_> {
    /// `INSERT INTO {table} ({names}) VALUES (:names)`.
    ///
    /// Bind keys are the wire names themselves.
    pub fn insert<P: Describe + ?Sized>(&self, payload: &P) -> SqlResult<BuiltStatement> {
        let table = self.table()?;
        let fields = extract_fields(payload, self.scheme)?;
        if fields.is_empty() {
            return Err(SqlError::EmptyPayload("INSERT"));
        }

        let names: Vec<&str> = fields.keys().map(String::as_str).collect();
        let placeholders: Vec<String> = names.iter().map(|name| format!(":{name}")).collect();
        let sql = format!(
            "INSERT INTO {table} ({}) VALUES ({})",
            names.join(", "),
            placeholders.join(", ")
        );
        Ok(finish("INSERT", table, sql, fields))
    }

    /// Multi-row insert: `INSERT INTO {table} ({names}) VALUES (:idx0_a, ...), (:idx1_a, ...)`.
    ///
    /// The first row fixes the column set; every other row must present
    /// exactly the same columns.
    pub fn insert_many<P: Describe>(&self, payloads: &[P]) -> SqlResult<BuiltStatement> {
        let table = self.table()?;
        let Some((first, rest)) = payloads.split_first() else {
            return Err(SqlError::EmptyPayload("INSERT"));
        };

        let first = extract_fields(first, self.scheme).map_err(|e| SqlError::build(0, e))?;
        if first.is_empty() {
            return Err(SqlError::build(0, SqlError::EmptyPayload("INSERT")));
        }
        let columns: Vec<String> = first.keys().cloned().collect();

        let mut binds = Binds::new();
        let mut rows = Vec::with_capacity(payloads.len());
        let mut push_row = |index: usize, fields: FieldMap| {
            let prefix = batch_prefix(index);
            let mut placeholders = Vec::with_capacity(fields.len());
            for (name, value) in fields {
                let key = format!("{prefix}{name}");
                placeholders.push(format!(":{key}"));
                binds.insert(key, value);
            }
            rows.push(format!("({})", placeholders.join(", ")));
        };

        push_row(0, first);
        for (offset, payload) in rest.iter().enumerate() {
            let index = offset + 1;
            let fields =
                extract_fields(payload, self.scheme).map_err(|e| SqlError::build(index, e))?;
            if !fields.keys().eq(columns.iter()) {
                return Err(SqlError::build(
                    index,
                    SqlError::invalid_descriptor(format!(
                        "row columns ({}) differ from first row ({})",
                        fields.keys().cloned().collect::<Vec<_>>().join(", "),
                        columns.join(", ")
                    )),
                ));
            }
            push_row(index, fields);
        }

        let sql = format!(
            "INSERT INTO {table} ({}) VALUES {}",
            columns.join(", "),
            rows.join(", ")
        );
        Ok(finish("INSERT", table, sql, binds))
    }
}
