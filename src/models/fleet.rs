use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::alert::Alert;
use crate::repository::Entity;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VehicleStatus {
    #[default]
    Active,
    Maintenance,
    OutOfService,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: String,
    pub plate: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    #[serde(default)]
    pub status: VehicleStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    pub id: String,
    pub name: String,
    pub licence_number: Option<String>,
    /// Currently assigned vehicle, if any.
    pub vehicle_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRecord {
    pub id: i64,
    pub vehicle_id: String,
    pub kind: String,
    pub scheduled_for: NaiveDate,
    #[serde(default)]
    pub completed: bool,
}

impl Entity for Vehicle {
    type Key = String;

    fn key(&self) -> String {
        self.id.clone()
    }
}

impl Entity for Driver {
    type Key = String;

    fn key(&self) -> String {
        self.id.clone()
    }
}

impl Entity for MaintenanceRecord {
    type Key = i64;

    fn key(&self) -> i64 {
        self.id
    }
}

impl Entity for Alert {
    type Key = i64;

    fn key(&self) -> i64 {
        self.id
    }
}
