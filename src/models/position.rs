use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A telemetry sample as reported by the tracking backend. Speed is km/h.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub device_id: String,
    pub speed: f64,
    #[serde(default)]
    pub server_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
}

impl Position {
    pub fn new(device_id: impl Into<String>, speed: f64) -> Self {
        Self {
            device_id: device_id.into(),
            speed,
            server_time: None,
            latitude: 0.0,
            longitude: 0.0,
        }
    }

    /// km/h over `speed_limit`; zero or negative when within the limit.
    pub fn excess(&self, speed_limit: f64) -> f64 {
        self.speed - speed_limit
    }
}
