use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::filter::{Listable, SortKey};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Customer {
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
pub enum CustomerSort {
    Id,
    GivenName,
    LastName,
    JoinDate,
}

impl SortKey for CustomerSort {
    fn column(self) -> &'static str {
        match self {
            CustomerSort::Id => "id",
            CustomerSort::GivenName => "given_name",
            CustomerSort::LastName => "last_name",
            CustomerSort::JoinDate => "join_date",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "id" => Some(CustomerSort::Id),
            "given_name" => Some(CustomerSort::GivenName),
            "last_name" => Some(CustomerSort::LastName),
            "join_date" => Some(CustomerSort::JoinDate),
            _ => None,
        }
    }
}

impl Listable for Customer {
    type Sort = CustomerSort;

    const NAME: &'static str = "customers";
    const TABLE: &'static str = "customers";
    const COLUMNS: &'static str = "id, tenant_id, state, given_name, last_name, telephone, email, join_date, type_of";
    const SEARCH_COLUMNS: &'static [&'static str] = &["given_name", "last_name", "email", "telephone"];
    const DEFAULT_SORT: CustomerSort = CustomerSort::LastName;

    fn id(&self) -> i64 {
        self.id
    }
}
