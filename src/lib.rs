//! Loads Sparkify song metadata and listening logs into a SQLite star schema.
//!
//! Song files populate the `songs` and `artists` dimensions; activity logs
//! populate `time`, `users` and the `songplays` fact table, whose song and
//! artist references are resolved against the already loaded catalog.

pub mod cli_style;
pub mod config;
pub mod logging;
pub mod pipeline;
pub mod records;
pub mod sqlite_persistence;
pub mod store;
pub mod transform;
pub mod warehouse;
