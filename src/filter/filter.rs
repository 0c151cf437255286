use std::marker::PhantomData;

use super::error::FilterError;
use super::filter_where::FilterWhere;
use super::listable::{Listable, SortKey};
use super::types::{Page, SortDirection, SqlParam, SqlResult};

/// Structured listing request for one entity.
///
/// Compiles to a data query and a count query that share the same predicate
/// prefix: tenant, search, foreign keys, then states. Only the data query
/// carries the keyset cursor, ORDER BY and LIMIT/OFFSET.
#[derive(Debug)]
pub struct EntityFilter<T: Listable> {
    pub tenant_id: i64,
    pub states: Vec<i16>,
    pub search: Option<String>,
    pub equals: Vec<(&'static str, SqlParam)>,
    pub sort: T::Sort,
    pub order: SortDirection,
    pub page: Page,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Listable> EntityFilter<T> {
    /// Filter with the entity's default states, sort and fixed scope applied.
    pub fn new(tenant_id: i64, page: Page) -> Self {
        let mut filter = Self {
            tenant_id,
            states: T::DEFAULT_STATES.to_vec(),
            search: None,
            equals: Vec::new(),
            sort: T::DEFAULT_SORT,
            order: T::DEFAULT_ORDER,
            page,
            _entity: PhantomData,
        };
        T::scope(&mut filter);
        filter
    }

    pub fn with_equals(mut self, column: &'static str, value: SqlParam) -> Self {
        self.equals.push((column, value));
        self
    }

    pub fn to_sql(&self) -> Result<SqlResult, FilterError> {
        let mut w = self.predicates()?;

        let (order_clause, limit_clause) = match self.page {
            Page::Offset { offset, limit } => {
                let sort = self.sort.column();
                let order = if sort == "id" {
                    format!("ORDER BY id {}", self.order.to_sql())
                } else {
                    // id breaks ties so offset pages never overlap
                    format!("ORDER BY {} {}, id ASC", sort, self.order.to_sql())
                };
                let limit = w.param(SqlParam::BigInt(limit));
                let offset = w.param(SqlParam::BigInt(offset));
                (order, format!("LIMIT {} OFFSET {}", limit, offset))
            }
            Page::Keyset { last_seen_id, limit } => {
                if let Some(last) = last_seen_id {
                    let op = match self.order {
                        SortDirection::Asc => ">",
                        SortDirection::Desc => "<",
                    };
                    w.compare("id", op, SqlParam::BigInt(last));
                }
                let limit = w.param(SqlParam::BigInt(limit));
                (format!("ORDER BY id {}", self.order.to_sql()), format!("LIMIT {}", limit))
            }
        };

        let query = [
            format!("SELECT {} FROM {}", T::COLUMNS, T::TABLE),
            w.where_clause(),
            order_clause,
            limit_clause,
        ]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

        Ok(SqlResult { query, params: w.into_params() })
    }

    pub fn to_count_sql(&self) -> Result<SqlResult, FilterError> {
        let w = self.predicates()?;
        let where_clause = w.where_clause();
        let query = if where_clause.is_empty() {
            format!("SELECT COUNT(id) FROM {}", T::TABLE)
        } else {
            format!("SELECT COUNT(id) FROM {} {}", T::TABLE, where_clause)
        };
        Ok(SqlResult { query, params: w.into_params() })
    }

    fn predicates(&self) -> Result<FilterWhere, FilterError> {
        let mut w = FilterWhere::new();

        if let Some(column) = T::TENANT_COLUMN {
            w.eq(column, SqlParam::BigInt(self.tenant_id));
        }

        if let Some(term) = self.search.as_deref() {
            if T::SEARCH_COLUMNS.is_empty() {
                return Err(FilterError::UnsupportedFilter {
                    filter: "search",
                    entity: T::NAME,
                });
            }
            w.ilike_any(T::SEARCH_COLUMNS, term);
        }

        for (column, value) in &self.equals {
            w.eq(column, value.clone());
        }

        w.any_of(T::STATE_COLUMN, self.states.iter().map(|s| SqlParam::SmallInt(*s)));

        Ok(w)
    }
}
