use std::collections::BTreeSet;

use serde::Serialize;

use crate::models::Position;

/// (label, exclusive lower bound, inclusive upper bound) in km/h over the limit.
const RANGES: [(&str, f64, Option<f64>); 5] = [
    ("0-5", 0.0, Some(5.0)),
    ("5-10", 5.0, Some(10.0)),
    ("10-20", 10.0, Some(20.0)),
    ("20-30", 20.0, Some(30.0)),
    ("30+", 30.0, None),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeBucket {
    pub label: &'static str,
    pub min_excess: f64,
    pub max_excess: Option<f64>,
    pub vehicle_count: usize,
    pub percentage: f64,
}

impl RangeBucket {
    pub fn contains(&self, excess: f64) -> bool {
        in_range(excess, self.min_excess, self.max_excess)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverspeedReport {
    pub speed_limit: f64,
    pub total_vehicles: usize,
    pub buckets: Vec<RangeBucket>,
}

fn in_range(excess: f64, min: f64, max: Option<f64>) -> bool {
    excess > min && max.map_or(true, |m| excess <= m)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Distinct vehicles per excess range.
///
/// Membership is evaluated per range over every sample, so a vehicle whose
/// samples fall in several ranges is counted in each of them. Percentages
/// are relative to the distinct overspeeding vehicles and can therefore sum
/// past 100.
pub fn bucket_overspeed(positions: &[Position], speed_limit: f64) -> Vec<RangeBucket> {
    overspeed_report(positions, speed_limit).buckets
}

pub fn overspeed_report(positions: &[Position], speed_limit: f64) -> OverspeedReport {
    let total_vehicles = positions
        .iter()
        .filter(|p| p.speed > speed_limit)
        .map(|p| p.device_id.as_str())
        .collect::<BTreeSet<_>>()
        .len();

    let buckets = RANGES
        .iter()
        .map(|&(label, min, max)| {
            let vehicle_count = positions
                .iter()
                .filter(|p| in_range(p.excess(speed_limit), min, max))
                .map(|p| p.device_id.as_str())
                .collect::<BTreeSet<_>>()
                .len();
            let percentage = if total_vehicles == 0 {
                0.0
            } else {
                round2(vehicle_count as f64 / total_vehicles as f64 * 100.0)
            };
            RangeBucket {
                label,
                min_excess: min,
                max_excess: max,
                vehicle_count,
                percentage,
            }
        })
        .collect();

    OverspeedReport {
        speed_limit,
        total_vehicles,
        buckets,
    }
}
