use std::future::Future;

use crate::models::message::TelemetryMessage;
use crate::models::{Alert, Position};
use crate::processor::state::SharedState;
use tracing::{debug, info, warn};

/// Parses one telemetry payload. Returns `None` (after logging) when the
/// message is unusable; malformed input never fails the consumer.
pub fn parse_position(payload: &[u8]) -> Option<Position> {
    let message: TelemetryMessage = match serde_json::from_slice(payload) {
        Ok(m) => m,
        Err(e) => {
            warn!("Failed to parse message: {}", e);
            return None;
        }
    };

    if message.device_id().is_none() {
        warn!("Message {} missing device_id, skipping", message.uuid);
        return None;
    }

    match message.to_position() {
        Some(p) => Some(p),
        None => {
            warn!(
                "Invalid GPS_DATETIME: '{}'",
                message.data.gps_datetime.as_deref().unwrap_or("")
            );
            None
        }
    }
}

/// Records the sample and returns the speed alert to persist when it opens
/// an overspeed episode. Must run in arrival order per device.
pub async fn track(state: &SharedState, position: Position) -> Option<Alert> {
    let mut guard = state.write().await;
    if !guard.record(position.clone()) {
        return None;
    }
    match position.server_time {
        Some(at) => Some(guard.speed_alert(&position, at)),
        None => {
            guard.abandon_episode(&position.device_id);
            warn!(
                "Overspeed sample for {} has no fix time, no alert raised",
                position.device_id
            );
            None
        }
    }
}

/// Stores `alert` through `insert`, then adds it to the alert store with the
/// returned id. On failure the device's episode is reopened so a later
/// over-limit sample raises the alert again.
pub async fn persist_speed_alert<F, Fut>(
    state: &SharedState,
    mut alert: Alert,
    insert: F,
) -> anyhow::Result<()>
where
    F: FnOnce(Alert) -> Fut,
    Fut: Future<Output = anyhow::Result<i64>>,
{
    match insert(alert.clone()).await {
        Ok(id) => alert.id = id,
        Err(e) => {
            state.write().await.abandon_episode(&alert.vehicle_id);
            return Err(e);
        }
    }
    info!(
        "Raised speed alert {} for device {}: {}",
        alert.id, alert.vehicle_id, alert.description
    );

    let mut guard = state.write().await;
    if let Err(e) = guard.alerts.insert(alert) {
        warn!("Alert already in store: {}", e);
    }

    let report = guard.overspeed_report();
    debug!(
        "Overspeed distribution over {} vehicles: {}",
        report.total_vehicles,
        serde_json::to_string(&report.buckets).unwrap_or_default()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processor::FleetState;
    use crate::repository::{AlertStore, Repository};

    fn payload(device: &str, speed: f64, time: &str) -> Vec<u8> {
        format!(
            r#"{{"data": {{"DEVICE_ID": "{device}", "GPS_DATETIME": "{time}", "SPEED": "{speed}"}}, "uuid": "u"}}"#
        )
        .into_bytes()
    }

    fn position(device: &str, speed: f64, time: &str) -> Position {
        parse_position(&payload(device, speed, time)).unwrap()
    }

    #[test]
    fn test_parse_position_skips_garbage() {
        assert!(parse_position(b"not json").is_none());
        assert!(parse_position(br#"{"data": {"SPEED": "10"}, "uuid": "u"}"#).is_none());
        assert!(parse_position(
            br#"{"data": {"DEVICE_ID": "A", "GPS_DATETIME": "29/11/2025"}, "uuid": "u"}"#
        )
        .is_none());
    }

    #[test]
    fn test_parse_position_ok() {
        let pos = position("A", 88.5, "2025-11-29 06:15:15");
        assert_eq!(pos.device_id, "A");
        assert_eq!(pos.speed, 88.5);
    }

    #[tokio::test]
    async fn test_failed_insert_lets_next_sample_raise() {
        let state = FleetState::new(AlertStore::default(), 100.0, 10).into_shared();

        let alert = track(&state, position("b", 130.0, "2025-11-29 06:15:15"))
            .await
            .unwrap();
        let result = persist_speed_alert(&state, alert, |_| async {
            Err(anyhow::anyhow!("connection reset"))
        })
        .await;
        assert!(result.is_err());
        assert!(state.read().await.alerts.repo().is_empty());

        let retry = track(&state, position("b", 135.0, "2025-11-29 06:15:20")).await;
        assert!(retry.is_some());
    }

    #[tokio::test]
    async fn test_persisted_alert_enters_store_once() {
        let state = FleetState::new(AlertStore::default(), 100.0, 10).into_shared();

        let alert = track(&state, position("c", 120.0, "2025-11-29 06:15:15"))
            .await
            .unwrap();
        persist_speed_alert(&state, alert, |_| async { Ok(42) })
            .await
            .unwrap();

        assert!(track(&state, position("c", 125.0, "2025-11-29 06:15:20"))
            .await
            .is_none());

        let guard = state.read().await;
        assert_eq!(guard.alerts.repo().len(), 1);
        let stored = guard.alerts.repo().get(&42).unwrap();
        assert_eq!(stored.vehicle_id, "c");
    }

    #[tokio::test]
    async fn test_out_of_order_samples_raise_one_alert() {
        let state = FleetState::new(AlertStore::default(), 100.0, 10).into_shared();
        let raised = [
            track(&state, position("a", 130.0, "2025-11-29 06:15:20")).await,
            track(&state, position("a", 90.0, "2025-11-29 06:15:10")).await,
            track(&state, position("a", 131.0, "2025-11-29 06:15:30")).await,
        ];
        assert_eq!(raised.iter().filter(|a| a.is_some()).count(), 1);
    }
}
