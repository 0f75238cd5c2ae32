use anyhow::Result;
use chrono::NaiveDateTime;
use sqlx::FromRow;
use tracing::warn;

use crate::db::{queries, DbPool};
use crate::error::ValidationError;
use crate::models::{Alert, AlertStatus, Coordinates};

#[derive(Debug, FromRow)]
pub struct AlertRow {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub timestamp: NaiveDateTime,
    pub status: String,    // Enum in DB, map to String
    pub alert_type: String, // Enum in DB, map to String
    pub vehicle_id: String,
    pub driver_name: Option<String>,
    pub location: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub comment: Option<String>,
}

impl TryFrom<AlertRow> for Alert {
    type Error = ValidationError;

    fn try_from(row: AlertRow) -> Result<Self, Self::Error> {
        let status: AlertStatus = row.status.parse()?;
        let mut alert = Alert::new(
            row.id,
            row.alert_type.parse()?,
            row.vehicle_id,
            row.title,
            row.description,
            row.timestamp,
        );
        alert.driver_name = row.driver_name;
        alert.location = row.location;
        alert.coordinates = match (row.lat, row.lng) {
            (Some(lat), Some(lng)) => Some(Coordinates::new(lat, lng)),
            _ => None,
        };
        // the stored comment was written by an operator status change
        alert.change_status(status, row.comment.as_deref());
        Ok(alert)
    }
}

/// Loads the alert snapshot. Rows with an unknown type or status are
/// skipped, never coerced.
pub async fn load_alerts(pool: &DbPool) -> Result<Vec<Alert>> {
    let rows: Vec<AlertRow> = sqlx::query_as(queries::SELECT_ALERTS)
        .fetch_all(pool)
        .await?;

    let mut alerts = Vec::with_capacity(rows.len());
    for row in rows {
        let id = row.id;
        match Alert::try_from(row) {
            Ok(alert) => alerts.push(alert),
            Err(e) => warn!("Skipping alert {}: {}", id, e),
        }
    }
    Ok(alerts)
}

/// Persists `alert` and returns the id assigned by the database.
pub async fn insert_alert(pool: &DbPool, alert: &Alert) -> Result<i64> {
    let id: i64 = sqlx::query_scalar(queries::INSERT_ALERT)
        .bind(&alert.title)
        .bind(&alert.description)
        .bind(alert.timestamp)
        .bind(alert.status.as_str())
        .bind(alert.alert_type().as_str())
        .bind(&alert.vehicle_id)
        .bind(&alert.driver_name)
        .bind(&alert.location)
        .bind(alert.coordinates.map(|c| c.lat))
        .bind(alert.coordinates.map(|c| c.lng))
        .bind(alert.comment())
        .fetch_one(pool)
        .await?;
    Ok(id)
}
