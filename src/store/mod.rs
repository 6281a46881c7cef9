mod queries;
#[cfg(test)]
pub mod recording_store;
mod sqlite_store;
mod trait_def;
mod value;

pub use queries::Statement;
pub use sqlite_store::SqliteStore;
pub use trait_def::Store;
pub use value::SqlValue;
