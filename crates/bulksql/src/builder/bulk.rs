use super::{BuiltStatement, StatementBuilder, finish};
use crate::condition::batch_prefix;
use crate::describe::Describe;
use crate::error::{SqlError, SqlResult};
use crate::value::Binds;

pub(crate) const BEGIN_MARKER: &str = "START TRANSACTION;";
pub(crate) const COMMIT_MARKER: &str = "COMMIT;";

/// One row of a bulk update: what to set, and which rows to set it on.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateItem<P, C> {
    pub payload: P,
    pub condition: C,
}

impl<P, C> UpdateItem<P, C> {
    pub fn new(payload: P, condition: C) -> Self {
        Self { payload, condition }
    }
}

impl StatementBuilder<'_> {
    /// Compose one UPDATE per item into a single transaction script:
    ///
    /// ```text
    /// START TRANSACTION;
    /// UPDATE t SET a=:idx0_val_a WHERE b=:idx0_cond_b;
    /// UPDATE t SET a=:idx1_val_a WHERE b=:idx1_cond_b;
    /// COMMIT;
    /// ```
    ///
    /// Item `i` uses bind-key prefix `idx{i}_`, so the merged bind map never
    /// has colliding keys. The first failing item aborts the whole call with
    /// [`SqlError::Build`]; nothing partial is returned.
    pub fn bulk_update<P, C>(&self, items: &[UpdateItem<P, C>]) -> SqlResult<BuiltStatement>
    where
        P: Describe,
        C: Describe,
    {
        let table = self.table()?;

        let mut script = String::from(BEGIN_MARKER);
        let mut binds = Binds::new();
        for (index, item) in items.iter().enumerate() {
            let stmt = self
                .update_with_prefix(&item.payload, &item.condition, &batch_prefix(index))
                .map_err(|e| SqlError::build(index, e))?;
            script.push('\n');
            script.push_str(&stmt.sql);
            script.push(';');
            binds.extend(stmt.binds);
        }
        script.push('\n');
        script.push_str(COMMIT_MARKER);

        Ok(finish("BULK UPDATE", table, script, binds))
    }
}

/// The statements of a bulk script, without the transaction markers or
/// trailing semicolons.
pub fn script_statements(script: &str) -> impl Iterator<Item = &str> {
    script
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && *line != BEGIN_MARKER && *line != COMMIT_MARKER)
        .map(|line| line.strip_suffix(';').unwrap_or(line))
}
