use serde::Serialize;
use sqlx::{postgres::PgRow, FromRow};

use super::filter::EntityFilter;
use super::types::{PaginationMode, SortDirection};

/// Allow-listed sort field of one entity. Only these columns ever reach ORDER BY.
pub trait SortKey: std::fmt::Debug + Copy + Send + Sync + 'static {
    fn column(self) -> &'static str;

    fn parse(value: &str) -> Option<Self>;
}

/// A tenant-scoped entity exposed through a list endpoint.
///
/// Table and column names are compile-time constants; request input only
/// ever selects among them or flows through bind parameters.
pub trait Listable: for<'r> FromRow<'r, PgRow> + Serialize + Send + Unpin + 'static {
    type Sort: SortKey;

    /// Display name used in error messages.
    const NAME: &'static str;
    const TABLE: &'static str;
    const COLUMNS: &'static str;

    /// `None` only for the tenant registry itself, which is not tenant-owned.
    const TENANT_COLUMN: Option<&'static str> = Some("tenant_id");
    const STATE_COLUMN: &'static str = "state";

    /// Empty means free-text search is unsupported.
    const SEARCH_COLUMNS: &'static [&'static str] = &[];
    const FOREIGN_KEYS: &'static [&'static str] = &[];

    const DEFAULT_SORT: Self::Sort;
    const DEFAULT_ORDER: SortDirection = SortDirection::Asc;
    const DEFAULT_STATES: &'static [i16] = &[];

    const PAGINATION: PaginationMode = PaginationMode::Offset;
    const EXECUTIVE_ONLY: bool = false;

    fn id(&self) -> i64;

    /// Fixed predicates every listing of this entity carries.
    fn scope(_filter: &mut EntityFilter<Self>)
    where
        Self: Sized,
    {
    }
}
