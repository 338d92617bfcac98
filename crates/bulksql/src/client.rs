//! Generic client trait for unified database access.

use crate::error::{SqlError, SqlResult};
use tokio_postgres::Row;
use tokio_postgres::types::ToSql;

/// A trait that unifies database clients and transactions.
///
/// Repository methods accept any `GenericClient`, so the same code runs
/// against a plain connection, a pooled connection or an open transaction.
/// Backend errors come back as [`SqlError::Query`] without modification.
pub trait GenericClient: Send + Sync {
    /// Execute a query and return all rows.
    fn query(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl std::future::Future<Output = SqlResult<Vec<Row>>> + Send;

    /// Execute a query and return the **first** row.
    ///
    /// Returns [`SqlError::NotFound`] if no rows are returned.
    fn query_one(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl std::future::Future<Output = SqlResult<Row>> + Send {
        async move {
            let rows = self.query(sql, params).await?;
            rows.into_iter()
                .next()
                .ok_or_else(|| SqlError::not_found("Expected one row, got none"))
        }
    }

    /// Execute a query and return at most one row.
    fn query_opt(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl std::future::Future<Output = SqlResult<Option<Row>>> + Send {
        async move {
            let rows = self.query(sql, params).await?;
            Ok::<_, SqlError>(rows.into_iter().next())
        }
    }

    /// Execute a statement and return the number of affected rows.
    fn execute(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl std::future::Future<Output = SqlResult<u64>> + Send;
}

impl GenericClient for tokio_postgres::Client {
    async fn query(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> SqlResult<Vec<Row>> {
        Ok(tokio_postgres::Client::query(self, sql, params).await?)
    }

    async fn execute(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> SqlResult<u64> {
        Ok(tokio_postgres::Client::execute(self, sql, params).await?)
    }
}

impl GenericClient for tokio_postgres::Transaction<'_> {
    async fn query(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> SqlResult<Vec<Row>> {
        Ok(tokio_postgres::Transaction::query(self, sql, params).await?)
    }

    async fn execute(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> SqlResult<u64> {
        Ok(tokio_postgres::Transaction::execute(self, sql, params).await?)
    }
}

/// A connection or transaction that can open a (nested) transaction.
///
/// On a plain connection this issues `BEGIN`. On an open transaction it
/// creates a savepoint, so the caller's outer transaction keeps control of
/// the final commit. The returned transaction rolls back when dropped
/// without [`commit`](tokio_postgres::Transaction::commit).
pub trait TransactionClient: Send {
    fn begin(
        &mut self,
    ) -> impl std::future::Future<Output = SqlResult<tokio_postgres::Transaction<'_>>> + Send;
}

impl TransactionClient for tokio_postgres::Client {
    async fn begin(&mut self) -> SqlResult<tokio_postgres::Transaction<'_>> {
        Ok(tokio_postgres::Client::transaction(self).await?)
    }
}

impl TransactionClient for tokio_postgres::Transaction<'_> {
    async fn begin(&mut self) -> SqlResult<tokio_postgres::Transaction<'_>> {
        Ok(tokio_postgres::Transaction::transaction(self).await?)
    }
}

// ===== deadpool-postgres support =====

#[cfg(feature = "pool")]
impl TransactionClient for deadpool_postgres::ClientWrapper {
    async fn begin(&mut self) -> SqlResult<tokio_postgres::Transaction<'_>> {
        TransactionClient::begin(&mut **self).await
    }
}

#[cfg(feature = "pool")]
impl TransactionClient for deadpool_postgres::Client {
    async fn begin(&mut self) -> SqlResult<tokio_postgres::Transaction<'_>> {
        TransactionClient::begin(&mut **self).await
    }
}

#[cfg(feature = "pool")]
impl TransactionClient for deadpool_postgres::Transaction<'_> {
    async fn begin(&mut self) -> SqlResult<tokio_postgres::Transaction<'_>> {
        TransactionClient::begin(&mut **self).await
    }
}

#[cfg(feature = "pool")]
impl GenericClient for deadpool_postgres::ClientWrapper {
    async fn query(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> SqlResult<Vec<Row>> {
        GenericClient::query(&**self, sql, params).await
    }

    async fn execute(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> SqlResult<u64> {
        GenericClient::execute(&**self, sql, params).await
    }
}

#[cfg(feature = "pool")]
impl GenericClient for deadpool_postgres::Client {
    async fn query(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> SqlResult<Vec<Row>> {
        // Delegate to the deref target (ClientWrapper / tokio_postgres::Client).
        GenericClient::query(&**self, sql, params).await
    }

    async fn execute(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> SqlResult<u64> {
        GenericClient::execute(&**self, sql, params).await
    }
}

#[cfg(feature = "pool")]
impl GenericClient for deadpool_postgres::Transaction<'_> {
    async fn query(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> SqlResult<Vec<Row>> {
        GenericClient::query(&**self, sql, params).await
    }

    async fn execute(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> SqlResult<u64> {
        GenericClient::execute(&**self, sql, params).await
    }
}
