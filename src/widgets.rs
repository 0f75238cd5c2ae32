//! Dashboard widgets.
//!
//! A widget is one of a closed set of shapes; each carries the input its
//! renderer needs and renders to a serializable payload for the chart or
//! map surface. Drawing itself happens client side.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::engine::{self, OverspeedReport, TypeCount};
use crate::error::ValidationError;
use crate::models::{Alert, AlertStatus, MapBounds, MapPoint};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    Donut,
    Line,
    Bar,
    Progress,
    Map,
}

impl WidgetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WidgetKind::Donut => "donut",
            WidgetKind::Line => "line",
            WidgetKind::Bar => "bar",
            WidgetKind::Progress => "progress",
            WidgetKind::Map => "map",
        }
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WidgetKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "donut" => Ok(WidgetKind::Donut),
            "line" => Ok(WidgetKind::Line),
            "bar" => Ok(WidgetKind::Bar),
            "progress" => Ok(WidgetKind::Progress),
            "map" => Ok(WidgetKind::Map),
            _ => Err(ValidationError::UnknownWidgetKind(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slice {
    pub label: String,
    pub value: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinePoint {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarDatum {
    pub label: String,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Widget {
    Donut { title: String, counts: Vec<TypeCount> },
    Line { title: String, series: Vec<LinePoint> },
    Bar { title: String, bars: Vec<BarDatum> },
    Progress { title: String, value: f64, target: f64 },
    Map { title: String, points: Vec<MapPoint> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum WidgetPayload {
    Donut { title: String, slices: Vec<Slice> },
    Line { title: String, points: Vec<LinePoint> },
    Bar { title: String, bars: Vec<BarDatum> },
    Progress { title: String, percent: f64 },
    Map { title: String, points: Vec<MapPoint>, bounds: MapBounds },
}

impl Widget {
    /// Builds the widget of `kind` over an already filtered alert list.
    ///
    /// Donut: alerts per type. Line: alerts per day. Bar: alerts per status.
    /// Progress: share of treated alerts. Map: one marker per alert.
    pub fn for_alerts(kind: WidgetKind, title: impl Into<String>, alerts: &[Alert]) -> Self {
        let title = title.into();
        match kind {
            WidgetKind::Donut => Widget::Donut {
                title,
                counts: engine::count_by_type(alerts),
            },
            WidgetKind::Line => {
                let mut per_day: BTreeMap<String, f64> = BTreeMap::new();
                for alert in alerts {
                    *per_day
                        .entry(alert.timestamp.date().format("%Y-%m-%d").to_string())
                        .or_default() += 1.0;
                }
                Widget::Line {
                    title,
                    series: per_day
                        .into_iter()
                        .map(|(label, value)| LinePoint { label, value })
                        .collect(),
                }
            }
            WidgetKind::Bar => Widget::Bar {
                title,
                bars: engine::count_by_status(alerts)
                    .into_iter()
                    .map(|c| BarDatum {
                        label: c.status.to_string(),
                        value: c.count as f64,
                        percentage: None,
                    })
                    .collect(),
            },
            WidgetKind::Progress => Widget::Progress {
                title,
                value: alerts
                    .iter()
                    .filter(|a| a.status == AlertStatus::Treated)
                    .count() as f64,
                target: alerts.len() as f64,
            },
            WidgetKind::Map => Widget::Map {
                title,
                points: engine::to_map_points(alerts),
            },
        }
    }

    pub fn overspeed_bar(title: impl Into<String>, report: &OverspeedReport) -> Self {
        Widget::Bar {
            title: title.into(),
            bars: report
                .buckets
                .iter()
                .map(|b| BarDatum {
                    label: b.label.to_string(),
                    value: b.vehicle_count as f64,
                    percentage: Some(b.percentage),
                })
                .collect(),
        }
    }

    pub fn kind(&self) -> WidgetKind {
        match self {
            Widget::Donut { .. } => WidgetKind::Donut,
            Widget::Line { .. } => WidgetKind::Line,
            Widget::Bar { .. } => WidgetKind::Bar,
            Widget::Progress { .. } => WidgetKind::Progress,
            Widget::Map { .. } => WidgetKind::Map,
        }
    }

    pub fn render(&self) -> WidgetPayload {
        match self {
            Widget::Donut { title, counts } => render_donut(title, counts),
            Widget::Line { title, series } => render_line(title, series),
            Widget::Bar { title, bars } => render_bar(title, bars),
            Widget::Progress {
                title,
                value,
                target,
            } => render_progress(title, *value, *target),
            Widget::Map { title, points } => render_map(title, points),
        }
    }
}

fn share(part: f64, whole: f64) -> f64 {
    if whole <= 0.0 {
        return 0.0;
    }
    (part / whole * 100.0 * 100.0).round() / 100.0
}

fn render_donut(title: &str, counts: &[TypeCount]) -> WidgetPayload {
    let total: usize = counts.iter().map(|c| c.count).sum();
    WidgetPayload::Donut {
        title: title.to_string(),
        slices: counts
            .iter()
            .map(|c| Slice {
                label: c.alert_type.to_string(),
                value: c.count,
                percentage: share(c.count as f64, total as f64),
            })
            .collect(),
    }
}

fn render_line(title: &str, series: &[LinePoint]) -> WidgetPayload {
    WidgetPayload::Line {
        title: title.to_string(),
        points: series.to_vec(),
    }
}

fn render_bar(title: &str, bars: &[BarDatum]) -> WidgetPayload {
    WidgetPayload::Bar {
        title: title.to_string(),
        bars: bars.to_vec(),
    }
}

fn render_progress(title: &str, value: f64, target: f64) -> WidgetPayload {
    WidgetPayload::Progress {
        title: title.to_string(),
        percent: share(value, target).clamp(0.0, 100.0),
    }
}

fn render_map(title: &str, points: &[MapPoint]) -> WidgetPayload {
    WidgetPayload::Map {
        title: title.to_string(),
        points: points.to_vec(),
        bounds: engine::compute_bounds(points),
    }
}
