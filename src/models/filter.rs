use std::collections::BTreeSet;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;

use crate::error::ValidationError;
use crate::models::alert::{AlertStatus, AlertType};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TypeFilter {
    #[default]
    All,
    Only(AlertType),
}

impl TypeFilter {
    pub fn matches(&self, alert_type: AlertType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Only(t) => *t == alert_type,
        }
    }
}

impl FromStr for TypeFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(TypeFilter::All);
        }
        s.parse().map(TypeFilter::Only)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(AlertStatus),
}

impl StatusFilter {
    pub fn matches(&self, status: AlertStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(s) => *s == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        s.parse().map(StatusFilter::Only)
    }
}

/// Inclusive date window. The end bound is stored already pushed to
/// 23:59:59.999 of its day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
}

impl DateRange {
    pub fn new(
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
    ) -> Result<Self, ValidationError> {
        let end = end.map(end_of_day);
        if let (Some(s), Some(e)) = (start, end) {
            if s > e {
                return Err(ValidationError::InvertedDateRange {
                    start: s.to_string(),
                    end: e.to_string(),
                });
            }
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> Option<NaiveDateTime> {
        self.start
    }

    pub fn end(&self) -> Option<NaiveDateTime> {
        self.end
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn contains(&self, ts: NaiveDateTime) -> bool {
        self.start.map_or(true, |s| ts >= s) && self.end.map_or(true, |e| ts <= e)
    }
}

fn end_of_day(ts: NaiveDateTime) -> NaiveDateTime {
    ts.date().and_hms_milli_opt(23, 59, 59, 999).unwrap_or(ts)
}

/// The user's current filter selection. `Default` lets everything through.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub date_range: DateRange,
    pub vehicle_ids: BTreeSet<String>,
    pub zone: Option<String>,
    pub alert_type: TypeFilter,
    pub status: StatusFilter,
}

impl FilterCriteria {
    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    pub fn with_type(mut self, alert_type: TypeFilter) -> Self {
        self.alert_type = alert_type;
        self
    }

    pub fn with_zone(mut self, zone: impl Into<String>) -> Self {
        self.zone = Some(zone.into());
        self
    }

    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = range;
        self
    }

    pub fn with_vehicles<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.vehicle_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Checkbox semantics from the vehicle picker: add when absent, remove when present.
    pub fn toggle_vehicle(&mut self, id: &str) {
        if !self.vehicle_ids.remove(id) {
            self.vehicle_ids.insert(id.to_string());
        }
    }

    /// Lowercased zone needle, `None` when the zone filter is inactive.
    /// Surrounding whitespace only decides blankness; it stays part of the needle.
    pub fn zone_needle(&self) -> Option<String> {
        self.zone
            .as_deref()
            .filter(|z| !z.trim().is_empty())
            .map(str::to_lowercase)
    }

    pub fn is_noop(&self) -> bool {
        self.status == StatusFilter::All
            && self.alert_type == TypeFilter::All
            && self.vehicle_ids.is_empty()
            && self.date_range.is_unbounded()
            && self.zone_needle().is_none()
    }

    /// Builds criteria from raw UI/query-string values, rejecting unknown
    /// type or status names instead of letting them match nothing.
    pub fn from_params(params: FilterParams) -> Result<Self, ValidationError> {
        let start = parse_date_param(params.start.as_deref())?;
        let end = parse_date_param(params.end.as_deref())?;

        let alert_type = match non_blank(params.alert_type.as_deref()) {
            Some(t) => t.parse()?,
            None => TypeFilter::All,
        };
        let status = match non_blank(params.status.as_deref()) {
            Some(s) => s.parse()?,
            None => StatusFilter::All,
        };

        Ok(Self {
            date_range: DateRange::new(start, end)?,
            vehicle_ids: params
                .vehicles
                .into_iter()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .collect(),
            zone: params.zone.filter(|z| !z.trim().is_empty()),
            alert_type,
            status,
        })
    }
}

/// Raw filter values as they arrive from the dashboard.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterParams {
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub vehicles: Vec<String>,
    #[serde(default, alias = "selectedZone")]
    pub zone: Option<String>,
    #[serde(default, alias = "type")]
    pub alert_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_date_param(value: Option<&str>) -> Result<Option<NaiveDateTime>, ValidationError> {
    let Some(raw) = non_blank(value) else {
        return Ok(None);
    };

    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(d.and_hms_opt(0, 0, 0));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S"))
        .map(Some)
        .map_err(|_| ValidationError::InvalidDate(raw.to_string()))
}
