use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::filter::{Listable, PaginationMode, SortDirection, SortKey};

/// Registry row for one tenant organisation. Listed by keyset on `id`,
/// executives only.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Tenant {
    pub id: i64,
    pub schema_name: String,
    pub name: String,
    pub state: i16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TenantSort {
    Id,
}

impl SortKey for TenantSort {
    fn column(self) -> &'static str {
        "id"
    }

    fn parse(value: &str) -> Option<Self> {
        (value == "id").then_some(TenantSort::Id)
    }
}

impl Listable for Tenant {
    type Sort = TenantSort;

    const NAME: &'static str = "tenants";
    const TABLE: &'static str = "tenants";
    const COLUMNS: &'static str = "id, schema_name, name, state";
    const TENANT_COLUMN: Option<&'static str> = None;
    const DEFAULT_SORT: TenantSort = TenantSort::Id;
    const DEFAULT_ORDER: SortDirection = SortDirection::Desc;
    const PAGINATION: PaginationMode = PaginationMode::Keyset;
    const EXECUTIVE_ONLY: bool = true;

    fn id(&self) -> i64 {
        self.id
    }
}
