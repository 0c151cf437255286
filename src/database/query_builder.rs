use std::time::Instant;

use sqlx::{self, postgres::PgArguments, postgres::PgRow, FromRow, PgPool};

use crate::database::manager::{with_timeout, DatabaseError, QuerySettings};
use crate::filter::types::{SqlParam, SqlResult};

/// Run a compiled data query and map every row into `T`.
pub async fn fetch_rows<T>(pool: &PgPool, sql: &SqlResult, settings: &QuerySettings) -> Result<Vec<T>, DatabaseError>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let mut q = sqlx::query_as::<_, T>(&sql.query);
    for p in sql.params.iter() {
        q = bind_param_query_as(q, p);
    }

    let started = Instant::now();
    let rows = with_timeout(settings.timeout, q.fetch_all(pool)).await?;
    warn_if_slow(&sql.query, started, settings);
    Ok(rows)
}

/// Run a compiled `SELECT COUNT(..)` query.
pub async fn fetch_count(pool: &PgPool, sql: &SqlResult, settings: &QuerySettings) -> Result<i64, DatabaseError> {
    let mut q = sqlx::query_scalar::<_, i64>(&sql.query);
    for p in sql.params.iter() {
        q = bind_param_query_scalar(q, p);
    }

    let started = Instant::now();
    let count = with_timeout(settings.timeout, q.fetch_one(pool)).await?;
    warn_if_slow(&sql.query, started, settings);
    Ok(count)
}

fn warn_if_slow(query: &str, started: Instant, settings: &QuerySettings) {
    if let Some(threshold) = settings.slow_query_threshold {
        let elapsed = started.elapsed();
        if elapsed > threshold {
            tracing::warn!("Slow query ({}ms): {}", elapsed.as_millis(), query);
        }
    }
}

fn bind_param_query_as<'q, O>(
    q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>,
    v: &'q SqlParam,
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>
where
    O: for<'r> FromRow<'r, PgRow>,
{
    match v {
        SqlParam::BigInt(i) => q.bind(*i),
        SqlParam::SmallInt(i) => q.bind(*i),
        SqlParam::Text(s) => q.bind(s.as_str()),
        SqlParam::Bool(b) => q.bind(*b),
    }
}

fn bind_param_query_scalar<'q, O>(
    q: sqlx::query::QueryScalar<'q, sqlx::Postgres, O, PgArguments>,
    v: &'q SqlParam,
) -> sqlx::query::QueryScalar<'q, sqlx::Postgres, O, PgArguments> {
    match v {
        SqlParam::BigInt(i) => q.bind(*i),
        SqlParam::SmallInt(i) => q.bind(*i),
        SqlParam::Text(s) => q.bind(s.as_str()),
        SqlParam::Bool(b) => q.bind(*b),
    }
}
