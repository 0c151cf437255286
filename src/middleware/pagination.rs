use serde::Serialize;

use crate::config::PaginationConfig;
use crate::filter::{Page, PaginationMode};

/// Page window parsed from the query string. Never fails: malformed values
/// fall back to defaults and sizes are capped to the configured maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageParams {
    pub page_token: u64,
    pub page_size: u64,
    pub offset: u64,
    pub limit: u64,
}

impl PageParams {
    pub fn parse(raw_query: Option<&str>, config: &PaginationConfig) -> Self {
        let mut page_token = None;
        let mut page_size = None;
        let mut offset = None;
        let mut limit = None;

        if let Some(raw) = raw_query {
            for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
                let parsed = value.trim().parse::<u64>().ok();
                match key.as_ref() {
                    "page_token" => page_token = parsed,
                    "page_size" => page_size = parsed,
                    "offset" => offset = parsed,
                    "limit" => limit = parsed,
                    _ => {}
                }
            }
        }

        Self {
            page_token: page_token.unwrap_or(0),
            page_size: bound_size("page_size", page_size, config),
            offset: offset.unwrap_or(0),
            limit: bound_size("limit", limit, config),
        }
    }

    /// Window in the shape the entity paginates with. A zero page token means
    /// "first page".
    pub fn page(&self, mode: PaginationMode) -> Page {
        match mode {
            PaginationMode::Offset => Page::Offset {
                offset: to_sql_int(self.offset),
                limit: to_sql_int(self.limit),
            },
            PaginationMode::Keyset => Page::Keyset {
                last_seen_id: (self.page_token > 0).then(|| to_sql_int(self.page_token)),
                limit: to_sql_int(self.page_size),
            },
        }
    }
}

fn bound_size(name: &str, requested: Option<u64>, config: &PaginationConfig) -> u64 {
    match requested {
        None | Some(0) => config.default_page_size,
        Some(n) if n > config.max_page_size => {
            tracing::warn!("{} {} exceeds max {}, capping to max", name, n, config.max_page_size);
            config.max_page_size
        }
        Some(n) => n,
    }
}

fn to_sql_int(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
