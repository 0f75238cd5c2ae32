use serde::Serialize;

use crate::models::alert::AlertType;

/// Marker handed to the map surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPoint {
    pub lat: f64,
    pub lng: f64,
    pub description: String,
    #[serde(rename = "type")]
    pub alert_type: AlertType,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapBounds {
    pub center: [f64; 2],
    pub zoom: u8,
}
