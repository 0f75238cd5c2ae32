use chrono::{NaiveDate, NaiveDateTime};

use crate::models::{Alert, AlertStatus, AlertType};

pub(crate) fn at(day: u32, hour: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, day)
        .unwrap()
        .and_hms_opt(hour, min, 0)
        .unwrap()
}

/// The seven dashboard seed alerts.
pub(crate) fn seed_alerts() -> Vec<Alert> {
    vec![
        Alert::new(1, AlertType::Speed, "VH-001", "Speed limit exceeded", "132 km/h on A1 motorway", at(1, 8, 15))
            .with_driver("Youssef Amrani")
            .with_location("A1 motorway, Kenitra")
            .with_coordinates(34.261, -6.580),
        Alert::new(2, AlertType::Fuel, "VH-002", "Low fuel level", "Tank below 10%", at(1, 9, 40))
            .with_driver("Salma Idrissi")
            .with_location("Fuel station, Casablanca")
            .with_coordinates(33.573, -7.589),
        Alert::new(3, AlertType::Activity, "VH-003", "Excessive idle", "Engine idle for 45 minutes", at(2, 11, 5))
            .with_location("Port of Tangier")
            .with_coordinates(35.784, -5.813),
        Alert::new(4, AlertType::Geofence, "VH-001", "Geofence exit", "Left authorised delivery zone", at(2, 14, 30))
            .with_driver("Youssef Amrani")
            .with_location("Industrial zone, Casablanca")
            .with_coordinates(33.606, -7.532)
            .with_status(AlertStatus::InProgress),
        Alert::new(5, AlertType::Time, "VH-004", "Driving time exceeded", "Driver on the road for 10 hours", at(3, 18, 0))
            .with_driver("Karim Benali")
            .with_status(AlertStatus::Treated),
        Alert::new(6, AlertType::Speed, "VH-002", "Speed limit exceeded", "98 km/h in urban area", at(4, 7, 45))
            .with_location("Agdal, Rabat"),
        Alert::new(7, AlertType::Geofence, "VH-005", "Restricted area entry", "Entered restricted zone", at(5, 16, 20))
            .with_location("Government restricted area, Rabat")
            .with_coordinates(34.015, -6.832),
    ]
}
