use std::future::Future;

use sqlx::PgPool;

use crate::database::manager::{DatabaseError, QuerySettings};
use crate::database::query_builder::{fetch_count, fetch_rows};
use crate::filter::{EntityFilter, Listable};

/// One page of rows plus the total number of rows matching the filter.
#[derive(Debug)]
pub struct Listing<T> {
    pub rows: Vec<T>,
    pub total: i64,
}

pub struct Repository<T> {
    pool: PgPool,
    settings: QuerySettings,
    _phantom: std::marker::PhantomData<fn() -> T>,
}

impl<T: Listable> Repository<T> {
    pub fn new(pool: PgPool, settings: QuerySettings) -> Self {
        Self {
            pool,
            settings,
            _phantom: std::marker::PhantomData,
        }
    }

    pub async fn list_by_filter(&self, filter: &EntityFilter<T>) -> Result<Vec<T>, DatabaseError> {
        let sql = filter.to_sql()?;
        tracing::debug!(entity = T::NAME, query = %sql.query, "list");
        fetch_rows(&self.pool, &sql, &self.settings).await
    }

    pub async fn count_by_filter(&self, filter: &EntityFilter<T>) -> Result<i64, DatabaseError> {
        let sql = filter.to_count_sql()?;
        fetch_count(&self.pool, &sql, &self.settings).await
    }

    /// Data and count queries driven concurrently over the same filter.
    pub async fn fetch_page(&self, filter: &EntityFilter<T>) -> Result<Listing<T>, DatabaseError> {
        join_page(self.list_by_filter(filter), self.count_by_filter(filter)).await
    }
}

/// Join the two halves of a listing. Completes when both finish or as soon as
/// either fails; the first error wins and the other future is dropped.
pub async fn join_page<T, E, R, C>(rows: R, count: C) -> Result<Listing<T>, E>
where
    R: Future<Output = Result<Vec<T>, E>>,
    C: Future<Output = Result<i64, E>>,
{
    let (rows, total) = tokio::try_join!(rows, count)?;
    Ok(Listing { rows, total })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn joins_both_results() {
        let listing = join_page(async { Ok::<_, DatabaseError>(vec![1, 2, 3]) }, async { Ok(12) })
            .await
            .unwrap();
        assert_eq!(listing.rows, vec![1, 2, 3]);
        assert_eq!(listing.total, 12);
    }

    #[tokio::test]
    async fn count_failure_surfaces_instead_of_zero() {
        let result = join_page(
            async { Ok::<Vec<i32>, _>(vec![1]) },
            async { Err(DatabaseError::QueryError("count failed".to_string())) },
        )
        .await;
        assert!(matches!(result, Err(DatabaseError::QueryError(msg)) if msg == "count failed"));
    }

    #[tokio::test]
    async fn failure_does_not_wait_for_a_stuck_sibling() {
        let stuck = std::future::pending::<Result<Vec<i32>, DatabaseError>>();
        let failing = async { Err(DatabaseError::Timeout(5000)) };

        let result = tokio::time::timeout(Duration::from_secs(1), join_page(stuck, failing))
            .await
            .expect("join must terminate");
        assert!(matches!(result, Err(DatabaseError::Timeout(5000))));
    }

    #[tokio::test]
    async fn queries_run_concurrently() {
        let rows = async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            Ok::<_, DatabaseError>(vec![1])
        };
        let count = async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            Ok(1)
        };

        let started = std::time::Instant::now();
        join_page(rows, count).await.unwrap();
        assert!(started.elapsed() < Duration::from_millis(190));
    }
}
