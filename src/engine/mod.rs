//! Alert query engine.
//!
//! Pure functions that turn an alert snapshot plus the user's filter
//! selection into what the dashboard draws: the filtered list, map markers
//! with their viewport, overspeed distribution and per-category counts.
//! Nothing in here performs I/O or logs.

pub mod filter;
pub mod map;
pub mod overspeed;
pub mod summary;

pub use filter::{alert_matches, filter_alerts};
pub use map::{compute_bounds, to_map_points, FALLBACK_CENTER};
pub use overspeed::{bucket_overspeed, overspeed_report, OverspeedReport, RangeBucket};
pub use summary::{count_by_status, count_by_type, AlertSummary, StatusCount, TypeCount};
