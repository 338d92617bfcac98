//! Connection pool utilities

use crate::error::{SqlError, SqlResult};
use deadpool_postgres::{Manager, ManagerConfig, Pool, PoolBuilder, RecyclingMethod};
use tokio_postgres::NoTls;

/// Create a connection pool from a database URL.
///
/// Uses `NoTls` and a max size of 16.
///
/// # Example
///
/// ```ignore
/// let pool = bulksql::create_pool(&std::env::var("DATABASE_URL")?)?;
/// let client = pool.get().await?;
/// ```
pub fn create_pool(database_url: &str) -> SqlResult<Pool> {
    create_pool_with_config(database_url, 16)
}

/// Create a connection pool with a custom max size.
pub fn create_pool_with_config(database_url: &str, max_size: usize) -> SqlResult<Pool> {
    create_pool_with_manager_config(database_url, default_manager_config(), |builder| {
        builder.max_size(max_size)
    })
}

/// Create a connection pool with an injected `ManagerConfig` and `PoolBuilder` tuning.
pub fn create_pool_with_manager_config(
    database_url: &str,
    manager_config: ManagerConfig,
    configure_pool: impl FnOnce(PoolBuilder) -> PoolBuilder,
) -> SqlResult<Pool> {
    let pg_config: tokio_postgres::Config = database_url
        .parse()
        .map_err(|e: tokio_postgres::Error| SqlError::Connection(e.to_string()))?;

    let mgr = Manager::from_config(pg_config, NoTls, manager_config);
    configure_pool(Pool::builder(mgr))
        .build()
        .map_err(|e| SqlError::Pool(e.to_string()))
}

fn default_manager_config() -> ManagerConfig {
    ManagerConfig {
        recycling_method: RecyclingMethod::Fast,
    }
}
