//! Fleet alert service: the alert query engine used by the dashboard plus
//! the telemetry consumer that raises speed alerts.

pub mod config;
pub mod db;
pub mod engine;
pub mod error;
pub mod kafka;
pub mod models;
pub mod processor;
pub mod repository;
pub mod widgets;

#[cfg(test)]
mod testing;

pub use engine::{bucket_overspeed, compute_bounds, filter_alerts, to_map_points};
pub use error::ValidationError;
pub use models::{Alert, AlertStatus, AlertType, FilterCriteria, MapPoint, Position};
