pub mod schema;
pub use schema::Schema;

pub mod stmt;

pub mod instance;
pub use instance::Instance;

/// A Result type alias used throughout quarry.
pub type Result<T> = anyhow::Result<T>;
