use serde::Serialize;

use crate::models::{Alert, AlertStatus, AlertType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeCount {
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: AlertStatus,
    pub count: usize,
}

/// Every alert type in declaration order, zero counts included.
pub fn count_by_type(alerts: &[Alert]) -> Vec<TypeCount> {
    AlertType::ALL
        .iter()
        .map(|&alert_type| TypeCount {
            alert_type,
            count: alerts.iter().filter(|a| a.alert_type() == alert_type).count(),
        })
        .collect()
}

pub fn count_by_status(alerts: &[Alert]) -> Vec<StatusCount> {
    AlertStatus::ALL
        .iter()
        .map(|&status| StatusCount {
            status,
            count: alerts.iter().filter(|a| a.status == status).count(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertSummary {
    pub total: usize,
    pub by_type: Vec<TypeCount>,
    pub by_status: Vec<StatusCount>,
}

impl AlertSummary {
    pub fn from_alerts(alerts: &[Alert]) -> Self {
        Self {
            total: alerts.len(),
            by_type: count_by_type(alerts),
            by_status: count_by_status(alerts),
        }
    }

    pub fn untreated(&self) -> usize {
        self.by_status
            .iter()
            .find(|s| s.status == AlertStatus::Untreated)
            .map_or(0, |s| s.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::seed_alerts;

    #[test]
    fn test_seed_summary() {
        let summary = AlertSummary::from_alerts(&seed_alerts());
        assert_eq!(summary.total, 7);

        let by_type: Vec<usize> = summary.by_type.iter().map(|c| c.count).collect();
        assert_eq!(by_type, vec![2, 1, 1, 2, 1]);

        let by_status: Vec<usize> = summary.by_status.iter().map(|c| c.count).collect();
        assert_eq!(by_status, vec![5, 1, 1]);
        assert_eq!(summary.untreated(), 5);
    }

    #[test]
    fn test_empty_input_keeps_all_categories() {
        let summary = AlertSummary::from_alerts(&[]);
        assert_eq!(summary.by_type.len(), 5);
        assert_eq!(summary.by_status.len(), 3);
        assert!(summary.by_type.iter().all(|c| c.count == 0));
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(count_by_type(&seed_alerts())).unwrap();
        assert_eq!(json[3]["type"], "geofence");
        assert_eq!(json[3]["count"], 2);
    }
}
