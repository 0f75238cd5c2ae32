use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertType {
    Speed,
    Fuel,
    Activity,
    Geofence,
    Time,
}

impl AlertType {
    pub const ALL: [AlertType; 5] = [
        AlertType::Speed,
        AlertType::Fuel,
        AlertType::Activity,
        AlertType::Geofence,
        AlertType::Time,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AlertType::Speed => "speed",
            AlertType::Fuel => "fuel",
            AlertType::Activity => "activity",
            AlertType::Geofence => "geofence",
            AlertType::Time => "time",
        }
    }
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlertType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "speed" => Ok(AlertType::Speed),
            "fuel" => Ok(AlertType::Fuel),
            "activity" => Ok(AlertType::Activity),
            "geofence" => Ok(AlertType::Geofence),
            "time" => Ok(AlertType::Time),
            _ => Err(ValidationError::UnknownAlertType(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlertStatus {
    #[default]
    Untreated,
    InProgress,
    Treated,
}

impl AlertStatus {
    pub const ALL: [AlertStatus; 3] = [
        AlertStatus::Untreated,
        AlertStatus::InProgress,
        AlertStatus::Treated,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AlertStatus::Untreated => "untreated",
            AlertStatus::InProgress => "in-progress",
            AlertStatus::Treated => "treated",
        }
    }
}

impl fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlertStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "untreated" => Ok(AlertStatus::Untreated),
            "in-progress" => Ok(AlertStatus::InProgress),
            "treated" => Ok(AlertStatus::Treated),
            _ => Err(ValidationError::UnknownStatus(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub timestamp: NaiveDateTime,
    #[serde(default)]
    pub status: AlertStatus,
    #[serde(rename = "type")]
    alert_type: AlertType,
    pub vehicle_id: String,
    #[serde(default)]
    pub driver_name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    comment: Option<String>,
}

impl Alert {
    /// New untreated alert with no optional descriptors.
    pub fn new(
        id: i64,
        alert_type: AlertType,
        vehicle_id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        timestamp: NaiveDateTime,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            timestamp,
            status: AlertStatus::Untreated,
            alert_type,
            vehicle_id: vehicle_id.into(),
            driver_name: None,
            location: None,
            coordinates: None,
            comment: None,
        }
    }

    /// Fixed at creation.
    pub fn alert_type(&self) -> AlertType {
        self.alert_type
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_driver(mut self, driver_name: impl Into<String>) -> Self {
        self.driver_name = Some(driver_name.into());
        self
    }

    pub fn with_coordinates(mut self, lat: f64, lng: f64) -> Self {
        self.coordinates = Some(Coordinates::new(lat, lng));
        self
    }

    pub fn with_status(mut self, status: AlertStatus) -> Self {
        self.status = status;
        self
    }

    /// Operator action: the only path that writes `comment`.
    /// A blank comment leaves the previous one in place.
    pub fn change_status(&mut self, status: AlertStatus, comment: Option<&str>) {
        self.status = status;
        if let Some(c) = comment.map(str::trim).filter(|c| !c.is_empty()) {
            self.comment = Some(c.to_string());
        }
    }
}
