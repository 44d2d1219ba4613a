use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use csv::StringRecord;
use serde::Deserialize;

use crate::schema::{Column, Schema};

const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Parse a trip timestamp such as `2017-01-01 09:07:57`.
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
}

/// Typed view of the columns we understand. Any column may be missing from
/// a given city's header row; unknown columns are ignored here but kept in
/// the raw record.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawTrip {
    #[serde(rename = "Start Time", default)]
    pub start_time: Option<String>,
    #[serde(rename = "End Time", default)]
    pub end_time: Option<String>,
    #[serde(rename = "Start Station", default)]
    pub start_station: Option<String>,
    #[serde(rename = "End Station", default)]
    pub end_station: Option<String>,
    #[serde(rename = "User Type", default)]
    pub user_type: Option<String>,
    #[serde(rename = "Gender", default)]
    pub gender: Option<String>,
    #[serde(rename = "Birth Year", default)]
    pub birth_year: Option<f64>,
}

/// One trip. `month` and `day_of_week` are derived from the start time at
/// load; other derived values are computed on demand.
#[derive(Debug, Clone)]
pub struct TripRecord {
    pub raw: StringRecord,
    pub start_time: Option<NaiveDateTime>,
    pub end_time: Option<NaiveDateTime>,
    pub start_station: Option<String>,
    pub end_station: Option<String>,
    pub user_type: Option<String>,
    pub gender: Option<String>,
    pub birth_year: Option<i32>,
    pub month: Option<u32>,
    pub day_of_week: Option<Weekday>,
}

impl TripRecord {
    pub fn hour(&self) -> Option<u32> {
        self.start_time.map(|t| t.hour())
    }

    /// Whole minutes between start and end, truncated.
    pub fn duration_minutes(&self) -> Option<i64> {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => Some((end - start).num_minutes()),
            _ => None,
        }
    }

    /// "Start -> End" label for the trip's station pair.
    pub fn route(&self) -> Option<String> {
        match (&self.start_station, &self.end_station) {
            (Some(from), Some(to)) => Some(format!("{from} -> {to}")),
            _ => None,
        }
    }

    pub(crate) fn derive_calendar(&mut self) {
        self.month = self.start_time.map(|t| t.month());
        self.day_of_week = self.start_time.map(|t| t.weekday());
    }
}

/// An in-memory city table: the header row, which optional columns it
/// carries, and its trips in file order.
#[derive(Debug, Clone)]
pub struct TripTable {
    headers: StringRecord,
    schema: Schema,
    records: Vec<TripRecord>,
    calendar_derived: bool,
}

impl TripTable {
    pub(crate) fn new(headers: StringRecord, records: Vec<TripRecord>) -> Self {
        let schema = Schema::from_headers(headers.iter());
        Self {
            headers,
            schema,
            records,
            calendar_derived: false,
        }
    }

    pub fn headers(&self) -> &StringRecord {
        &self.headers
    }

    pub fn schema(&self) -> Schema {
        self.schema
    }

    pub fn has(&self, column: Column) -> bool {
        self.schema.has(column)
    }

    pub fn records(&self) -> &[TripRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether the month and day-of-week columns were derived. False when
    /// the source has no start-time column.
    pub fn has_calendar_columns(&self) -> bool {
        self.calendar_derived
    }

    pub(crate) fn derive_calendar_columns(&mut self) {
        if !self.schema.has(Column::StartTime) {
            return;
        }
        for record in &mut self.records {
            record.derive_calendar();
        }
        self.calendar_derived = true;
    }

    pub(crate) fn retain<F>(&mut self, keep: F)
    where
        F: FnMut(&TripRecord) -> bool,
    {
        self.records.retain(keep);
    }

    /// Rows `start..end`, clamped to the table.
    pub fn rows(&self, start: usize, end: usize) -> &[TripRecord] {
        let end = end.min(self.records.len());
        let start = start.min(end);
        &self.records[start..end]
    }

    /// Render one row as a JSON object in header order.
    pub fn row_json(&self, record: &TripRecord) -> serde_json::Value {
        let map = self
            .headers
            .iter()
            .zip(record.raw.iter())
            .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
            .collect::<serde_json::Map<_, _>>();
        serde_json::Value::Object(map)
    }
}

pub(crate) fn birth_year_from(value: f64) -> Option<i32> {
    if value.is_finite() {
        Some(value.trunc() as i32)
    } else {
        None
    }
}
