//! Relational store adapter.

use sqlx::postgres::{PgArguments, PgPoolOptions, PgRow};
use sqlx::query::Query;
use sqlx::{PgPool, Postgres};

use crate::Result;

/// A positional statement parameter, bound to `$1`, `$2`, ... in order.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Text(Option<String>),
    Float(Option<f64>),
    Bool(bool),
}

impl SqlParam {
    /// A non-null text parameter.
    pub fn text(value: impl Into<String>) -> Self {
        SqlParam::Text(Some(value.into()))
    }
}

impl From<&str> for SqlParam {
    fn from(value: &str) -> Self {
        SqlParam::text(value)
    }
}

impl From<Option<String>> for SqlParam {
    fn from(value: Option<String>) -> Self {
        SqlParam::Text(value)
    }
}

impl From<Option<f64>> for SqlParam {
    fn from(value: Option<f64>) -> Self {
        SqlParam::Float(value)
    }
}

impl From<bool> for SqlParam {
    fn from(value: bool) -> Self {
        SqlParam::Bool(value)
    }
}

/// Pooled PostgreSQL connection.
///
/// Knows nothing about entities: it runs a statement with parameters and hands
/// back raw rows or an affected-row count. Errors from the database are returned
/// as-is. Every call checks a connection out of the pool for that call only.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Wraps an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects a pool of at most `max_connections` connections.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Runs a statement and returns every row it produced, in order.
    #[tracing::instrument(level = "debug", skip(self, params), fields(params = params.len()))]
    pub async fn query(&self, statement: &str, params: &[SqlParam]) -> Result<Vec<PgRow>> {
        let rows = bind_params(sqlx::query(statement), params)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Runs a statement and returns the number of rows it affected.
    #[tracing::instrument(level = "debug", skip(self, params), fields(params = params.len()))]
    pub async fn execute(&self, statement: &str, params: &[SqlParam]) -> Result<u64> {
        let result = bind_params(sqlx::query(statement), params)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

fn bind_params<'q>(
    mut query: Query<'q, Postgres, PgArguments>,
    params: &'q [SqlParam],
) -> Query<'q, Postgres, PgArguments> {
    for param in params {
        query = match param {
            SqlParam::Text(value) => query.bind(value.as_deref()),
            SqlParam::Float(value) => query.bind(*value),
            SqlParam::Bool(value) => query.bind(*value),
        };
    }
    query
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions_pick_the_matching_variant() {
        assert_eq!(SqlParam::from("u1"), SqlParam::Text(Some("u1".to_string())));
        assert_eq!(SqlParam::from(None::<String>), SqlParam::Text(None));
        assert_eq!(SqlParam::from(Some(1.5)), SqlParam::Float(Some(1.5)));
        assert_eq!(SqlParam::from(true), SqlParam::Bool(true));
    }
}
