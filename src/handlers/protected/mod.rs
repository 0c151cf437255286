// Handlers behind the guard: every request here carries a resolved identity.
pub mod list;
pub mod profile;

pub use list::{list_entities, ListResponse};
pub use profile::profile;
