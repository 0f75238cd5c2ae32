use crate::models::{Alert, FilterCriteria};

/// Alerts satisfying every active predicate, in input order.
pub fn filter_alerts(alerts: &[Alert], criteria: &FilterCriteria) -> Vec<Alert> {
    let zone = criteria.zone_needle();
    alerts
        .iter()
        .filter(|a| matches_with_zone(a, criteria, zone.as_deref()))
        .cloned()
        .collect()
}

pub fn alert_matches(alert: &Alert, criteria: &FilterCriteria) -> bool {
    matches_with_zone(alert, criteria, criteria.zone_needle().as_deref())
}

// Cheapest predicates first.
fn matches_with_zone(alert: &Alert, criteria: &FilterCriteria, zone: Option<&str>) -> bool {
    if !criteria.status.matches(alert.status) {
        return false;
    }
    if !criteria.alert_type.matches(alert.alert_type()) {
        return false;
    }
    if !criteria.vehicle_ids.is_empty() && !criteria.vehicle_ids.contains(&alert.vehicle_id) {
        return false;
    }
    if !criteria.date_range.contains(alert.timestamp) {
        return false;
    }
    match zone {
        None => true,
        Some(needle) => alert
            .location
            .as_deref()
            .map_or(false, |loc| loc.to_lowercase().contains(needle)),
    }
}
