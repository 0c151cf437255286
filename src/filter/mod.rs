pub mod types;
pub mod filter;
pub mod filter_where;
pub mod listable;
pub mod params;
pub mod error;

pub use types::*;
pub use error::FilterError;
pub use filter::EntityFilter;
pub use listable::{Listable, SortKey};
pub use params::{build_filter, ListParams};
