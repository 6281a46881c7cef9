//! Shared constants for end-to-end tests

#![allow(dead_code)]

// ============================================================================
// Catalog
// ============================================================================

pub const SONG_1_ID: &str = "SOUPIRU12A6D4FA1E1";
pub const SONG_1_TITLE: &str = "Der Kleine Dompfaff";
pub const SONG_1_DURATION: f64 = 152.92036;
pub const ARTIST_1_ID: &str = "ARJIE2Y1187B994AB7";
pub const ARTIST_1_NAME: &str = "Line Renaud";

pub const SONG_2_ID: &str = "SOMZWCG12A8C13C480";
pub const ARTIST_2_ID: &str = "ARD7TVE1187B99BFB1";

// ============================================================================
// Activity
// ============================================================================

/// 2018-11-02 01:25:34.796 UTC, a Friday
pub const TS_1: i64 = 1541121934796;
pub const TS_1_TEXT: &str = "2018-11-02 01:25:34.796";

/// 2018-11-21 21:56:47.796 UTC, a Wednesday
pub const TS_2: i64 = 1542837407796;
pub const TS_2_TEXT: &str = "2018-11-21 21:56:47.796";

pub const USER_1_ID: i64 = 15;
pub const USER_2_ID: i64 = 26;
