use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::filter::{Listable, SortKey};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Associate {
    pub id: i64,
    pub tenant_id: i64,
    pub state: i16,
    pub given_name: String,
    pub last_name: String,
    pub lexical_name: String,
    pub telephone: String,
    pub email: String,
    pub join_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssociateSort {
    Id,
    LexicalName,
    JoinDate,
}

impl SortKey for AssociateSort {
    fn column(self) -> &'static str {
        match self {
            AssociateSort::Id => "id",
            AssociateSort::LexicalName => "lexical_name",
            AssociateSort::JoinDate => "join_date",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "id" => Some(AssociateSort::Id),
            "lexical_name" => Some(AssociateSort::LexicalName),
            "join_date" => Some(AssociateSort::JoinDate),
            _ => None,
        }
    }
}

// No search columns: free-text search is rejected for associates.
impl Listable for Associate {
    type Sort = AssociateSort;

    const NAME: &'static str = "associates";
    const TABLE: &'static str = "associates";
    const COLUMNS: &'static str = "id, tenant_id, state, given_name, last_name, lexical_name, telephone, email, join_date";
    const DEFAULT_SORT: AssociateSort = AssociateSort::LexicalName;
    const DEFAULT_STATES: &'static [i16] = &[1];

    fn id(&self) -> i64 {
        self.id
    }
}
