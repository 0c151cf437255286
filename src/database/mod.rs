pub mod manager;
pub mod query_builder;
pub mod repository;
pub mod models;

pub use manager::{DatabaseError, DatabaseManager, QuerySettings};
pub use repository::{join_page, Listing, Repository};
