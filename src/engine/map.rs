use crate::models::{Alert, MapBounds, MapPoint};

/// Viewport center when there is nothing to show (Rabat).
pub const FALLBACK_CENTER: [f64; 2] = [34.020882, -6.841650];
pub const DEFAULT_ZOOM: u8 = 6;
pub const SINGLE_POINT_ZOOM: u8 = 13;

/// (minimum spread in degrees, zoom), widest first.
const ZOOM_STEPS: [(f64, u8); 6] = [
    (10.0, 5),
    (5.0, 6),
    (2.0, 7),
    (1.0, 8),
    (0.5, 9),
    (0.1, 11),
];

/// One marker per alert, same order. Alerts without coordinates land on (0, 0).
pub fn to_map_points(alerts: &[Alert]) -> Vec<MapPoint> {
    alerts
        .iter()
        .map(|alert| {
            let (lat, lng) = alert
                .coordinates
                .map_or((0.0, 0.0), |c| (c.lat, c.lng));
            MapPoint {
                lat,
                lng,
                description: format!(
                    "{} ({}): {}",
                    alert.title, alert.vehicle_id, alert.description
                ),
                alert_type: alert.alert_type(),
            }
        })
        .collect()
}

pub fn compute_bounds(points: &[MapPoint]) -> MapBounds {
    match points {
        [] => MapBounds {
            center: FALLBACK_CENTER,
            zoom: DEFAULT_ZOOM,
        },
        [p] => MapBounds {
            center: [p.lat, p.lng],
            zoom: SINGLE_POINT_ZOOM,
        },
        _ => {
            let n = points.len() as f64;
            let (mut min_lat, mut max_lat) = (f64::INFINITY, f64::NEG_INFINITY);
            let (mut min_lng, mut max_lng) = (f64::INFINITY, f64::NEG_INFINITY);
            let (mut sum_lat, mut sum_lng) = (0.0, 0.0);
            for p in points {
                min_lat = min_lat.min(p.lat);
                max_lat = max_lat.max(p.lat);
                min_lng = min_lng.min(p.lng);
                max_lng = max_lng.max(p.lng);
                sum_lat += p.lat;
                sum_lng += p.lng;
            }
            let spread = (max_lat - min_lat).max(max_lng - min_lng);
            MapBounds {
                center: [sum_lat / n, sum_lng / n],
                zoom: zoom_for_spread(spread),
            }
        }
    }
}

/// Non-increasing in `spread`.
pub fn zoom_for_spread(spread: f64) -> u8 {
    ZOOM_STEPS
        .iter()
        .find(|(min, _)| spread > *min)
        .map_or(SINGLE_POINT_ZOOM, |(_, zoom)| *zoom)
}
