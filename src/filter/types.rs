use serde::{Deserialize, Serialize};

use super::error::FilterError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn to_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }

    pub fn parse(value: &str) -> Result<Self, FilterError> {
        match value.trim() {
            v if v.eq_ignore_ascii_case("asc") => Ok(SortDirection::Asc),
            v if v.eq_ignore_ascii_case("desc") => Ok(SortDirection::Desc),
            other => Err(FilterError::InvalidSortOrder(other.to_string())),
        }
    }
}

/// How a listing walks through its rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationMode {
    Offset,
    Keyset,
}

/// Bounded page window; `limit` and `offset` are already capped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Offset { offset: i64, limit: i64 },
    Keyset { last_seen_id: Option<i64>, limit: i64 },
}

impl Page {
    pub fn limit(&self) -> i64 {
        match self {
            Page::Offset { limit, .. } | Page::Keyset { limit, .. } => *limit,
        }
    }
}

/// Typed bind value. Everything user-supplied reaches SQL through one of these.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    BigInt(i64),
    SmallInt(i16),
    Text(String),
    Bool(bool),
}

#[derive(Debug, Clone)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<SqlParam>,
}
