use chrono::NaiveDateTime;
use serde::{de, Deserialize, Deserializer};
use serde_json::Value;
use std::collections::HashMap;

use crate::models::position::Position;

/// Device payload as published on the telemetry topic.
#[derive(Debug, Deserialize)]
pub struct TelemetryMessage {
    pub data: Data,
    #[serde(default)]
    pub metadata: Metadata,
    pub uuid: String,
}

#[derive(Debug, Deserialize)]
pub struct Data {
    #[serde(rename = "ALERT")]
    pub alert: Option<String>,
    #[serde(rename = "GPS_DATETIME")]
    pub gps_datetime: Option<String>,
    #[serde(rename = "LATITUD", default, deserialize_with = "parse_f64_option")]
    pub latitude: Option<f64>,
    #[serde(rename = "LONGITUD", default, deserialize_with = "parse_f64_option")]
    pub longitude: Option<f64>,
    #[serde(rename = "SPEED", default, deserialize_with = "parse_f64_option")]
    pub speed: Option<f64>,
    #[serde(rename = "DEVICE_ID")]
    pub device_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Metadata {
    #[serde(rename = "DEVICE_ID")]
    pub device_id: Option<String>,
    #[serde(flatten)]
    pub other: HashMap<String, Value>,
}

impl TelemetryMessage {
    pub fn device_id(&self) -> Option<&str> {
        self.data
            .device_id
            .as_deref()
            .or(self.metadata.device_id.as_deref())
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }

    /// GPS fix time; the firmware sends either a space or a `T` separator.
    pub fn gps_time(&self) -> Option<NaiveDateTime> {
        let raw = self.data.gps_datetime.as_deref()?.trim();
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
            .ok()
    }

    /// `None` when the message carries no usable device id or fix time.
    /// Missing coordinates and speed default to zero.
    pub fn to_position(&self) -> Option<Position> {
        let device_id = self.device_id()?;
        let server_time = self.gps_time()?;
        Some(Position {
            device_id: device_id.to_string(),
            speed: self.data.speed.unwrap_or(0.0),
            server_time: Some(server_time),
            latitude: self.data.latitude.unwrap_or(0.0),
            longitude: self.data.longitude.unwrap_or(0.0),
        })
    }
}

/// Numeric field sent either as a JSON number or as a (possibly blank) string.
fn parse_f64_option<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(Value::String(s)) => match s.trim() {
            "" => Ok(None),
            raw => raw.parse().map(Some).map_err(de::Error::custom),
        },
        Some(other) => Err(de::Error::invalid_type(
            de::Unexpected::Other(&other.to_string()),
            &"a number or numeric string",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_from_string_fields() {
        let payload = r#"
        {
            "data": {
                "COURSE": "0.00",
                "DEVICE_ID": "0848086072",
                "ENGINE_STATUS": "ON",
                "GPS_DATETIME": "2025-11-29 06:15:15",
                "LATITUD": "+33.573110",
                "LONGITUD": "-7.589843",
                "MSG_CLASS": "STATUS",
                "SPEED": "131.50"
            },
            "metadata": {
                "CLIENT_IP": "44.204.32.23",
                "WORKER_ID": 3
            },
            "uuid": "d52b1454-d43d-50fa-99ca-79515c904162"
        }
        "#;

        let msg: TelemetryMessage = serde_json::from_str(payload).unwrap();
        let pos = msg.to_position().unwrap();
        assert_eq!(pos.device_id, "0848086072");
        assert_eq!(pos.speed, 131.5);
        assert_eq!(pos.latitude, 33.57311);
        assert_eq!(pos.longitude, -7.589843);
        assert!(pos.server_time.is_some());
    }

    #[test]
    fn test_device_id_falls_back_to_metadata() {
        let payload = r#"
        {
            "data": { "GPS_DATETIME": "2025-11-29T06:15:15", "SPEED": 42 },
            "metadata": { "DEVICE_ID": "DEV-9" },
            "uuid": "x"
        }
        "#;
        let msg: TelemetryMessage = serde_json::from_str(payload).unwrap();
        let pos = msg.to_position().unwrap();
        assert_eq!(pos.device_id, "DEV-9");
        assert_eq!(pos.speed, 42.0);
        assert_eq!(pos.latitude, 0.0);
    }

    #[test]
    fn test_unusable_messages_yield_no_position() {
        let no_device = r#"{ "data": { "GPS_DATETIME": "2025-11-29 06:15:15" }, "uuid": "x" }"#;
        let msg: TelemetryMessage = serde_json::from_str(no_device).unwrap();
        assert!(msg.to_position().is_none());

        let bad_time = r#"{ "data": { "DEVICE_ID": "A", "GPS_DATETIME": "yesterday" }, "uuid": "x" }"#;
        let msg: TelemetryMessage = serde_json::from_str(bad_time).unwrap();
        assert!(msg.to_position().is_none());
    }

    #[test]
    fn test_blank_numeric_field_is_none() {
        let payload = r#"{ "data": { "DEVICE_ID": "A", "SPEED": "  " }, "uuid": "x" }"#;
        let msg: TelemetryMessage = serde_json::from_str(payload).unwrap();
        assert_eq!(msg.data.speed, None);
    }

    #[test]
    fn test_numeric_field_rejects_non_numbers() {
        let payload = r#"{ "data": { "DEVICE_ID": "A", "SPEED": true }, "uuid": "x" }"#;
        assert!(serde_json::from_str::<TelemetryMessage>(payload).is_err());

        let payload = r#"{ "data": { "DEVICE_ID": "A", "SPEED": "fast" }, "uuid": "x" }"#;
        assert!(serde_json::from_str::<TelemetryMessage>(payload).is_err());

        let payload = r#"{ "data": { "DEVICE_ID": "A", "SPEED": null }, "uuid": "x" }"#;
        let msg: TelemetryMessage = serde_json::from_str(payload).unwrap();
        assert_eq!(msg.data.speed, None);
    }
}
