use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("{filter} filter is not supported for {entity}")]
    UnsupportedFilter {
        filter: &'static str,
        entity: &'static str,
    },

    #[error("Invalid sort field: {0}")]
    InvalidSortField(String),

    #[error("Invalid sort order: {0} (expected ASC or DESC)")]
    InvalidSortOrder(String),

    #[error("Invalid value for {name}: {value}")]
    InvalidParameter { name: String, value: String },
}
