pub mod auth;
pub mod version;

pub use version::version;
