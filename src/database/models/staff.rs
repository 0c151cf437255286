use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::filter::{Listable, SortKey};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Staff {
    pub id: i64,
    pub tenant_id: i64,
    pub state: i16,
    pub given_name: String,
    pub last_name: String,
    pub telephone: String,
    pub email: String,
    pub join_date: Option<DateTime<Utc>>,
    pub type_of: i16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaffSort {
    Id,
    GivenName,
    LastName,
}

impl SortKey for StaffSort {
    fn column(self) -> &'static str {
        match self {
            StaffSort::Id => "id",
            StaffSort::GivenName => "given_name",
            StaffSort::LastName => "last_name",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "id" => Some(StaffSort::Id),
            "given_name" => Some(StaffSort::GivenName),
            "last_name" => Some(StaffSort::LastName),
            _ => None,
        }
    }
}

impl Listable for Staff {
    type Sort = StaffSort;

    const NAME: &'static str = "staff";
    const TABLE: &'static str = "staff";
    const COLUMNS: &'static str = "id, tenant_id, state, given_name, last_name, telephone, email, join_date, type_of";
    const SEARCH_COLUMNS: &'static [&'static str] = &["given_name", "last_name", "email"];
    const DEFAULT_SORT: StaffSort = StaffSort::LastName;

    fn id(&self) -> i64 {
        self.id
    }
}
