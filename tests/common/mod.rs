//! Common test infrastructure
//!
//! Tests should only import from this module, not from internal submodules.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::{TestWarehouse, SONG_1_ID};
//!
//! #[test]
//! fn test_load_one_song() {
//!     let warehouse = TestWarehouse::provisioned();
//!     warehouse.write_song("A/A/A", SONG_1_ID, &common::song_1_json());
//!     let summary = warehouse.run().unwrap();
//!     assert_eq!(summary.songs.files_processed, 1);
//! }
//! ```

mod constants;
mod fixtures;

pub use constants::*;
pub use fixtures::*;
