// Data loader: reads one city's CSV into memory, derives the calendar
// columns from the start time and applies at most one filter.

use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use chrono::NaiveDateTime;
use tracing::{debug, warn};

use crate::calendar::{day_name, month_index, normalize_month, title_case, City};
use crate::config::Config;
use crate::error::LoadError;
use crate::filters::FilterSelection;
use crate::schema;
use crate::table::{birth_year_from, parse_timestamp, RawTrip, TripRecord, TripTable};

/// Loads city tables from a data directory.
#[derive(Debug, Clone)]
pub struct TripLoader {
    data_dir: PathBuf,
    debug: bool,
}

impl TripLoader {
    pub fn new(config: &Config) -> Self {
        Self {
            data_dir: config.data_dir.clone(),
            debug: config.debug,
        }
    }

    pub fn path_for(&self, city: City) -> PathBuf {
        self.data_dir.join(city.file_name())
    }

    /// Load `city`, keeping only rows in `month_text` when it is non-empty,
    /// otherwise only rows on `day_text` when that is non-empty.
    ///
    /// A table without a start-time column loads unfiltered and without
    /// derived columns. An empty result is `Ok`.
    pub fn load(
        &self,
        city: &str,
        month_text: &str,
        day_text: &str,
    ) -> Result<TripTable, LoadError> {
        let result = self.load_city(city, month_text, day_text);
        match &result {
            Ok(table) => debug!(city, rows = table.len(), "loaded trip table"),
            Err(err) if self.debug => warn!(city, error = ?err, "failed to load trip table"),
            Err(err) => warn!(city, "failed to load trip table: {err}"),
        }
        result
    }

    pub fn load_selection(&self, selection: &FilterSelection) -> Result<TripTable, LoadError> {
        self.load(
            selection.city.name(),
            selection.month_text(),
            selection.day_text(),
        )
    }

    fn load_city(
        &self,
        city: &str,
        month_text: &str,
        day_text: &str,
    ) -> Result<TripTable, LoadError> {
        let city = City::parse(city).ok_or_else(|| LoadError::UnknownCity(city.to_string()))?;
        let path = self.path_for(city);
        let file = File::open(&path).map_err(|source| LoadError::Io {
            path: path.clone(),
            source,
        })?;
        read_table(file, month_text, day_text)
    }
}

/// Read a trip table from any CSV source and apply the month/day filter.
pub fn read_table<R: Read>(
    reader: R,
    month_text: &str,
    day_text: &str,
) -> Result<TripTable, LoadError> {
    let mut rdr = csv::ReaderBuilder::new().from_reader(reader);
    let headers = rdr.headers()?.clone();

    let mut records = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let raw = result?;
        let trip: RawTrip = raw.deserialize(Some(&headers))?;
        records.push(to_record(raw, trip, i + 1)?);
    }

    let mut table = TripTable::new(headers, records);
    table.derive_calendar_columns();
    apply_filter(&mut table, month_text, day_text);
    Ok(table)
}

fn to_record(raw: csv::StringRecord, trip: RawTrip, row: usize) -> Result<TripRecord, LoadError> {
    Ok(TripRecord {
        start_time: timestamp_cell(trip.start_time, row, schema::START_TIME)?,
        end_time: timestamp_cell(trip.end_time, row, schema::END_TIME)?,
        start_station: trip.start_station,
        end_station: trip.end_station,
        user_type: trip.user_type,
        gender: trip.gender,
        birth_year: trip.birth_year.and_then(birth_year_from),
        month: None,
        day_of_week: None,
        raw,
    })
}

// Blank cells are missing values; anything else must parse.
fn timestamp_cell(
    cell: Option<String>,
    row: usize,
    column: &'static str,
) -> Result<Option<NaiveDateTime>, LoadError> {
    match cell {
        Some(value) if !value.trim().is_empty() => parse_timestamp(&value)
            .map(Some)
            .ok_or(LoadError::Timestamp { row, column, value }),
        _ => Ok(None),
    }
}

fn apply_filter(table: &mut TripTable, month_text: &str, day_text: &str) {
    if !table.has_calendar_columns() {
        if !month_text.is_empty() || !day_text.is_empty() {
            debug!("no start-time column, filter ignored");
        }
        return;
    }

    if !month_text.is_empty() {
        match normalize_month(month_text).map(month_index) {
            Some(month) => table.retain(|r| r.month == Some(month)),
            None => table.retain(|_| false),
        }
    } else if !day_text.is_empty() {
        let wanted = title_case(day_text);
        table.retain(|r| r.day_of_week.map(day_name) == Some(wanted.as_str()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    // 2017-01-02 and 2017-02-06 are Mondays.
    const TRIPS: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year
1,2017-01-02 08:00:00,2017-01-02 08:20:30,1230,Canal St,Wacker Dr,Subscriber,Male,1989.0
2,2017-01-03 09:00:00,2017-01-03 09:10:00,600,Canal St,State St,Customer,,
3,2017-02-06 10:00:00,2017-02-06 10:05:00,300,State St,Canal St,Subscriber,Female,1992.0
4,2017-02-07 11:00:00,2017-02-07 11:45:00,2700,Wacker Dr,Canal St,Subscriber,Male,1975.0
";

    fn load(month: &str, day: &str) -> TripTable {
        read_table(TRIPS.as_bytes(), month, day).unwrap()
    }

    #[test]
    fn no_filter_keeps_every_row() {
        let table = load("", "");
        assert_eq!(table.len(), 4);
        assert!(table.has_calendar_columns());
        assert_eq!(table.records()[0].month, Some(1));
        assert_eq!(table.records()[0].day_of_week, Some(Weekday::Mon));
        assert_eq!(table.records()[0].birth_year, Some(1989));
        assert_eq!(table.records()[1].gender, None);
    }

    #[test]
    fn month_filter_keeps_only_that_month() {
        let table = load("January", "");
        assert_eq!(table.len(), 2);
        assert!(table.records().iter().all(|r| r.month == Some(1)));
    }

    #[test]
    fn day_filter_keeps_only_that_day() {
        let table = load("", "Monday");
        assert_eq!(table.len(), 2);
        assert!(table
            .records()
            .iter()
            .all(|r| r.day_of_week == Some(Weekday::Mon)));
    }

    #[test]
    fn day_filter_is_title_cased() {
        assert_eq!(load("", "tuesday").len(), 2);
    }

    #[test]
    fn month_wins_over_day() {
        let table = load("February", "Tuesday");
        assert_eq!(table.len(), 2);
        assert!(table.records().iter().all(|r| r.month == Some(2)));
    }

    #[test]
    fn unknown_month_text_matches_nothing() {
        let table = load("Feb", "");
        assert!(table.is_empty());
    }

    #[test]
    fn month_without_trips_is_empty_not_error() {
        assert!(load("June", "").is_empty());
    }

    #[test]
    fn missing_start_time_degrades_to_unfiltered() {
        let csv = "Start Station,End Station\nA,B\nB,C\n";
        let table = read_table(csv.as_bytes(), "January", "").unwrap();
        assert_eq!(table.len(), 2);
        assert!(!table.has_calendar_columns());
        assert!(table.records().iter().all(|r| r.month.is_none()));
        assert!(!table.has(schema::Column::StartTime));
    }

    #[test]
    fn blank_start_time_is_kept_but_never_matches_a_filter() {
        let csv = "Start Time\n2017-03-01 10:00:00\n\"\"\n";
        assert_eq!(read_table(csv.as_bytes(), "", "").unwrap().len(), 2);
        assert_eq!(read_table(csv.as_bytes(), "March", "").unwrap().len(), 1);
    }

    #[test]
    fn bad_timestamp_is_a_load_error() {
        let csv = "Start Time\nnot a time\n";
        let err = read_table(csv.as_bytes(), "", "").unwrap_err();
        assert!(matches!(err, LoadError::Timestamp { row: 1, .. }), "{err}");
    }

    #[test]
    fn ragged_rows_are_a_load_error() {
        let csv = "Start Time,Gender\n2017-03-01 10:00:00,Male,extra\n";
        assert!(matches!(
            read_table(csv.as_bytes(), "", ""),
            Err(LoadError::Csv(_))
        ));
    }

    #[test]
    fn unknown_city_and_missing_file_fail() {
        let dir = tempfile::tempdir().unwrap();
        let loader = TripLoader::new(&Config::new(dir.path()));
        assert!(matches!(
            loader.load("Boston", "", ""),
            Err(LoadError::UnknownCity(_))
        ));
        assert!(matches!(
            loader.load("Chicago", "", ""),
            Err(LoadError::Io { .. })
        ));
    }

    #[test]
    fn loads_city_file_from_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("new_york_city.csv"), TRIPS).unwrap();
        let loader = TripLoader::new(&Config::new(dir.path()));
        let table = loader.load("new york", "", "Tuesday").unwrap();
        assert_eq!(table.len(), 2);
    }
}
