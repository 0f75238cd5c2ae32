use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use chrono::NaiveDateTime;
use tokio::sync::RwLock;

use crate::engine::{self, OverspeedReport};
use crate::models::{Alert, AlertType, Position};
use crate::repository::AlertStore;

pub type SharedState = Arc<RwLock<FleetState>>;

#[derive(Debug, Default)]
struct DeviceTrack {
    samples: VecDeque<Position>,
    /// An over-limit episode whose alert has been raised.
    in_episode: bool,
    latest: Option<NaiveDateTime>,
}

/// Live view of the fleet: the alert store plus a bounded window of recent
/// samples per device.
#[derive(Debug)]
pub struct FleetState {
    pub alerts: AlertStore,
    speed_limit: f64,
    window: usize,
    devices: HashMap<String, DeviceTrack>,
}

impl FleetState {
    pub fn new(alerts: AlertStore, speed_limit: f64, window: usize) -> Self {
        Self {
            alerts,
            speed_limit,
            window: window.max(1),
            devices: HashMap::new(),
        }
    }

    pub fn into_shared(self) -> SharedState {
        Arc::new(RwLock::new(self))
    }

    pub fn speed_limit(&self) -> f64 {
        self.speed_limit
    }

    /// Stores the sample and reports whether it opens a new overspeed
    /// episode for its device. Samples older than the device's latest fix
    /// are dropped.
    pub fn record(&mut self, position: Position) -> bool {
        let limit = self.speed_limit;
        let window = self.window;
        let track = self.devices.entry(position.device_id.clone()).or_default();

        if let (Some(at), Some(latest)) = (position.server_time, track.latest) {
            if at < latest {
                return false;
            }
        }
        if position.server_time.is_some() {
            track.latest = position.server_time;
        }

        let is_over = position.speed > limit;
        let opens = is_over && !track.in_episode;
        track.in_episode = is_over;

        if track.samples.len() == window {
            track.samples.pop_front();
        }
        track.samples.push_back(position);

        opens
    }

    /// Forgets the open episode so the next over-limit sample raises again.
    /// Used when the episode's alert could not be stored.
    pub fn abandon_episode(&mut self, device_id: &str) {
        if let Some(track) = self.devices.get_mut(device_id) {
            track.in_episode = false;
        }
    }

    pub fn recent_positions(&self) -> Vec<Position> {
        self.devices
            .values()
            .flat_map(|t| t.samples.iter().cloned())
            .collect()
    }

    pub fn overspeed_report(&self) -> OverspeedReport {
        engine::overspeed_report(&self.recent_positions(), self.speed_limit)
    }

    /// Untreated speed alert for `position` raised at `at`; the id is
    /// assigned on insert.
    pub fn speed_alert(&self, position: &Position, at: NaiveDateTime) -> Alert {
        let alert = Alert::new(
            0,
            AlertType::Speed,
            position.device_id.clone(),
            "Speed limit exceeded",
            format!(
                "{:.0} km/h, {:.0} km/h over the {:.0} km/h limit",
                position.speed,
                position.excess(self.speed_limit),
                self.speed_limit
            ),
            at,
        );
        alert.with_coordinates(position.latitude, position.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AlertStatus;
    use crate::testing::at;

    fn sample(device: &str, speed: f64, minute: u32) -> Position {
        let mut p = Position::new(device, speed);
        p.server_time = Some(at(1, 10, minute));
        p
    }

    #[test]
    fn test_record_flags_only_episode_start() {
        let mut state = FleetState::new(AlertStore::default(), 100.0, 10);
        assert!(!state.record(Position::new("a", 90.0)));
        assert!(state.record(Position::new("a", 110.0)));
        assert!(!state.record(Position::new("a", 120.0)));
        assert!(!state.record(Position::new("a", 95.0)));
        assert!(state.record(Position::new("a", 101.0)));
        // first sample of a device can open an episode
        assert!(state.record(Position::new("b", 130.0)));
    }

    #[test]
    fn test_late_sample_does_not_split_episode() {
        let mut state = FleetState::new(AlertStore::default(), 100.0, 10);
        assert!(state.record(sample("a", 130.0, 2)));
        // 90 km/h fix from minute 1 arrives after minute 2
        assert!(!state.record(sample("a", 90.0, 1)));
        assert!(!state.record(sample("a", 131.0, 3)));

        let speeds: Vec<f64> = state.recent_positions().iter().map(|p| p.speed).collect();
        assert_eq!(speeds, vec![130.0, 131.0]);
    }

    #[test]
    fn test_abandoned_episode_raises_again() {
        let mut state = FleetState::new(AlertStore::default(), 100.0, 10);
        assert!(state.record(sample("b", 130.0, 1)));
        state.abandon_episode("b");
        assert!(state.record(sample("b", 135.0, 2)));
        assert!(!state.record(sample("b", 140.0, 3)));
        // unknown device is a no-op
        state.abandon_episode("zz");
    }

    #[test]
    fn test_window_is_bounded_per_device() {
        let mut state = FleetState::new(AlertStore::default(), 100.0, 3);
        for speed in [101.0, 102.0, 103.0, 104.0, 150.0] {
            state.record(Position::new("a", speed));
        }
        state.record(Position::new("b", 50.0));

        let recent = state.recent_positions();
        assert_eq!(recent.len(), 4);
        assert!(!recent.iter().any(|p| p.speed == 101.0));

        let report = state.overspeed_report();
        assert_eq!(report.total_vehicles, 1);
        assert_eq!(report.buckets[0].vehicle_count, 1);
        assert_eq!(report.buckets[4].vehicle_count, 1);
    }

    #[test]
    fn test_speed_alert_shape() {
        let state = FleetState::new(AlertStore::default(), 120.0, 5);
        let mut pos = Position::new("0848086072", 134.6);
        pos.latitude = 34.02;
        pos.longitude = -6.84;
        let alert = state.speed_alert(&pos, at(1, 10, 0));
        assert_eq!(alert.alert_type(), AlertType::Speed);
        assert_eq!(alert.status, AlertStatus::Untreated);
        assert_eq!(alert.vehicle_id, "0848086072");
        assert_eq!(alert.timestamp, at(1, 10, 0));
        assert_eq!(alert.description, "135 km/h, 15 km/h over the 120 km/h limit");
        assert_eq!(alert.coordinates.map(|c| c.lat), Some(34.02));
    }
}
