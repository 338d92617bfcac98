//! Table-scoped repository.
//!
//! [`Repository`] ties a table to three record types:
//!
//! - `M`: the model read back from SELECT (`FromRow`)
//! - `P`: the payload written by INSERT / UPDATE (`Describe`)
//! - `C`: the condition that scopes SELECT / UPDATE / DELETE (`Describe`)
//!
//! It builds statements with [`StatementBuilder`], binds them, runs them on any
//! [`GenericClient`], and logs the executed SQL under the `bulksql::sql` target.
//!
//! ```ignore
//! let repo: Repository<Product, ProductPayload, ProductCondition> = Repository::new("products");
//! let page = repo.select(&client, &["*"], Some(&cond), Some(&Paginate::new(1, 20))).await?;
//! let affected = repo.update_bulk(&mut client, &items).await?;
//! ```

use crate::bind::{BoundStatement, bind_named};
use crate::builder::{BuiltStatement, StatementBuilder, UpdateItem, script_statements};
use crate::client::{GenericClient, TransactionClient};
use crate::config::RepoConfig;
use crate::describe::Describe;
use crate::error::{SqlError, SqlResult};
use crate::paginate::{Page, Paginate};
use crate::row::{FromRow, count_from_row};
use std::marker::PhantomData;

pub struct Repository<M, P, C> {
    table: String,
    config: RepoConfig,
    _marker: PhantomData<fn() -> (M, P, C)>,
}

impl<M, P, C> Clone for Repository<M, P, C> {
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
            config: self.config.clone(),
            _marker: PhantomData,
        }
    }
}

impl<M, P, C> std::fmt::Debug for Repository<M, P, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("table", &self.table)
            .field("config", &self.config)
            .finish()
    }
}

impl<M, P, C> Repository<M, P, C> {
    pub fn new(table: impl Into<String>) -> Self {
        Self::with_config(table, RepoConfig::default())
    }

    pub fn with_config(table: impl Into<String>, config: RepoConfig) -> Self {
        Self {
            table: table.into(),
            config,
            _marker: PhantomData,
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn config(&self) -> &RepoConfig {
        &self.config
    }

    /// The statement builder for this table and naming scheme.
    pub fn builder(&self) -> StatementBuilder<'_> {
        StatementBuilder::new(&self.table).scheme(&self.config.scheme)
    }

    fn log(&self, kind: &'static str, bound: &BoundStatement) {
        tracing::debug!(
            target: "bulksql::sql",
            kind,
            table = %self.table,
            param_count = bound.args.len(),
            sql = %self.config.truncate_sql(&bound.sql),
        );
    }

    fn failed(&self, kind: &'static str, err: SqlError) -> SqlError {
        err.context(format!("{kind} on {} failed", self.table))
    }

    async fn execute_bound(
        &self,
        conn: &impl GenericClient,
        kind: &'static str,
        bound: &BoundStatement,
    ) -> SqlResult<u64> {
        self.log(kind, bound);
        conn.execute(&bound.sql, &bound.params_ref())
            .await
            .map_err(|e| self.failed(kind, e))
    }

    async fn execute(
        &self,
        conn: &impl GenericClient,
        kind: &'static str,
        stmt: &BuiltStatement,
    ) -> SqlResult<u64> {
        let bound = stmt.bind()?;
        self.execute_bound(conn, kind, &bound).await
    }
}

impl<M, P, C> Repository<M, P, C>
where
    C: Describe,
{
    /// Count the rows matching `condition` (all rows when `None`).
    pub async fn count(&self, conn: &impl GenericClient, condition: Option<&C>) -> SqlResult<i64> {
        let bound = self.builder().count(condition)?.bind()?;
        self.log("COUNT", &bound);
        let row = conn
            .query_one(&bound.sql, &bound.params_ref())
            .await
            .map_err(|e| self.failed("COUNT", e))?;
        count_from_row(&row)
    }

    /// Delete the rows matching `condition`. An empty condition is refused.
    pub async fn delete(&self, conn: &impl GenericClient, condition: &C) -> SqlResult<u64> {
        let stmt = self.builder().delete(condition)?;
        self.execute(conn, "DELETE", &stmt).await
    }
}

impl<M, P, C> Repository<M, P, C>
where
    M: FromRow,
    C: Describe,
{
    /// Fetch one page of rows plus the total matching `condition`.
    ///
    /// Without `paginate`, every matching row is returned as page 1 with
    /// `limit` equal to the total.
    pub async fn select<S: AsRef<str>>(
        &self,
        conn: &impl GenericClient,
        fields: &[S],
        condition: Option<&C>,
        paginate: Option<&Paginate>,
    ) -> SqlResult<Page<M>> {
        let bound = self.builder().select(fields, condition, paginate)?.bind()?;
        self.log("SELECT", &bound);
        let rows = conn
            .query(&bound.sql, &bound.params_ref())
            .await
            .map_err(|e| self.failed("SELECT", e))?;
        let data = rows.iter().map(M::from_row).collect::<SqlResult<Vec<_>>>()?;

        let total = self.count(conn, condition).await?;
        Ok(Page::new(data, total, paginate))
    }
}

impl<M, P, C> Repository<M, P, C>
where
    P: Describe,
{
    /// Insert one row from the present fields of `payload`.
    pub async fn create(&self, conn: &impl GenericClient, payload: &P) -> SqlResult<u64> {
        let stmt = self.builder().insert(payload)?;
        self.execute(conn, "INSERT", &stmt).await
    }

    /// Insert several rows with one multi-row INSERT.
    pub async fn create_bulk(&self, conn: &impl GenericClient, payloads: &[P]) -> SqlResult<u64> {
        let stmt = self.builder().insert_many(payloads)?;
        self.execute(conn, "INSERT", &stmt).await
    }
}

impl<M, P, C> Repository<M, P, C>
where
    P: Describe,
    C: Describe,
{
    /// Update the rows matching `condition` with the present fields of `payload`.
    pub async fn update(
        &self,
        conn: &impl GenericClient,
        payload: &P,
        condition: &C,
    ) -> SqlResult<u64> {
        let stmt = self.builder().update(payload, condition)?;
        self.execute(conn, "UPDATE", &stmt).await
    }

    /// Apply every item inside one transaction and return the total affected rows.
    ///
    /// `conn` may be a plain connection or an open transaction; in the latter
    /// case the batch runs under a savepoint and the caller decides the final
    /// commit. Any failure rolls the whole batch back, and so does dropping the
    /// returned future before it completes.
    pub async fn update_bulk(
        &self,
        conn: &mut impl TransactionClient,
        items: &[UpdateItem<P, C>],
    ) -> SqlResult<u64> {
        let script = self.builder().bulk_update(items)?;
        let statements = script_statements(&script.sql)
            .map(|sql| bind_named(sql, &script.binds))
            .collect::<SqlResult<Vec<_>>>()?;

        tracing::info!(
            target: "bulksql::sql",
            table = %self.table,
            items = items.len(),
            bind_count = script.binds.len(),
            "running bulk update"
        );

        let tx = conn
            .begin()
            .await
            .map_err(|e| self.failed("BULK UPDATE", e))?;

        let mut affected = 0;
        for bound in &statements {
            match self.execute_bound(&tx, "BULK UPDATE", bound).await {
                Ok(n) => affected += n,
                Err(err) => {
                    if let Err(rollback) = tx.rollback().await {
                        tracing::warn!(
                            target: "bulksql::sql",
                            table = %self.table,
                            error = %rollback,
                            "rollback after failed bulk update also failed"
                        );
                    }
                    return Err(err);
                }
            }
        }

        tx.commit()
            .await
            .map_err(|e| self.failed("BULK UPDATE", e.into()))?;
        Ok(affected)
    }
}
