// Descriptive statistics over a loaded table. Each block is computed into a
// plain struct first and then printed, and every block checks the table's
// schema itself: a statistic whose columns are missing is skipped quietly.

use std::collections::{BTreeMap, HashMap};
use std::time::Instant;

use tracing::debug;

use crate::calendar::day_name;
use crate::console::Console;
use crate::filters::SEPARATOR;
use crate::schema::Column;
use crate::table::TripTable;

pub const DURATION_UNIT: &str = "mins";

/// Most frequent value; ties go to the smallest value.
pub fn mode<T, I>(values: I) -> Option<T>
where
    T: Ord,
    I: IntoIterator<Item = T>,
{
    let mut counts: BTreeMap<T, usize> = BTreeMap::new();
    for value in values {
        *counts.entry(value).or_default() += 1;
    }
    let mut best: Option<(T, usize)> = None;
    for (value, count) in counts {
        if best.as_ref().map_or(true, |(_, top)| count > *top) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value)
}

/// Occurrences per distinct value, most frequent first, ties by value.
pub fn value_counts<'a, I>(values: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for value in values {
        *counts.entry(value).or_default() += 1;
    }
    let mut counts: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeStats {
    pub month: Option<u32>,
    pub day_of_week: Option<&'static str>,
    pub hour: Option<u32>,
}

impl TimeStats {
    pub fn compute(table: &TripTable) -> Self {
        if !table.has_calendar_columns() {
            debug!("no start-time column, skipping time stats");
            return Self::default();
        }
        let records = table.records();
        Self {
            month: mode(records.iter().filter_map(|r| r.month)),
            day_of_week: mode(records.iter().filter_map(|r| r.day_of_week.map(day_name))),
            hour: mode(records.iter().filter_map(|r| r.hour())),
        }
    }

    pub fn render<C: Console + ?Sized>(&self, console: &mut C) {
        if let Some(month) = self.month {
            console.say(&format!("Most Common Month: {month}"));
        }
        if let Some(day) = self.day_of_week {
            console.say(&format!("Most Common Day of Week: {day}"));
        }
        if let Some(hour) = self.hour {
            console.say(&format!("Most Common Start Hour: {hour}"));
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StationStats {
    pub start_station: Option<String>,
    pub end_station: Option<String>,
    pub route: Option<String>,
}

impl StationStats {
    pub fn compute(table: &TripTable) -> Self {
        let records = table.records();
        let mut stats = Self::default();
        if table.has(Column::StartStation) {
            stats.start_station = mode(records.iter().filter_map(|r| r.start_station.clone()));
        }
        if table.has(Column::EndStation) {
            stats.end_station = mode(records.iter().filter_map(|r| r.end_station.clone()));
        }
        if table
            .schema()
            .has_all(&[Column::StartStation, Column::EndStation])
        {
            stats.route = mode(records.iter().filter_map(|r| r.route()));
        }
        stats
    }

    pub fn render<C: Console + ?Sized>(&self, console: &mut C) {
        if let Some(station) = &self.start_station {
            console.say(&format!("Most Common Used Start Station: {station}"));
        }
        if let Some(station) = &self.end_station {
            console.say(&format!("Most Common Used End Station: {station}"));
        }
        if let Some(route) = &self.route {
            console.say(&format!(
                "Most Frequent Combination of Start Station and End Station Trip: {route}"
            ));
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DurationStats {
    pub total_minutes: i64,
    /// `None` when no trip has both timestamps.
    pub mean_minutes: Option<f64>,
}

impl DurationStats {
    /// `None` unless the table has both start and end times.
    pub fn compute(table: &TripTable) -> Option<Self> {
        if !table.schema().has_all(&[Column::StartTime, Column::EndTime]) {
            debug!("start or end time column missing, skipping duration stats");
            return None;
        }
        let minutes: Vec<i64> = table
            .records()
            .iter()
            .filter_map(|r| r.duration_minutes())
            .collect();
        let total_minutes: i64 = minutes.iter().sum();
        let mean_minutes = if minutes.is_empty() {
            None
        } else {
            Some(total_minutes as f64 / minutes.len() as f64)
        };
        Some(Self {
            total_minutes,
            mean_minutes,
        })
    }

    pub fn render<C: Console + ?Sized>(&self, console: &mut C) {
        console.say(&format!(
            "Total Travel Time: {} {DURATION_UNIT}",
            self.total_minutes
        ));
        match self.mean_minutes {
            Some(mean) => console.say(&format!("Mean Travel Time: {mean:.2} {DURATION_UNIT}")),
            None => console.say("Mean Travel Time: n/a"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthYears {
    pub earliest: i32,
    pub latest: i32,
    pub most_common: i32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserStats {
    pub user_types: Option<Vec<(String, usize)>>,
    pub genders: Option<Vec<(String, usize)>>,
    pub birth_years: Option<BirthYears>,
}

impl UserStats {
    pub fn compute(table: &TripTable) -> Self {
        let records = table.records();
        let mut stats = Self::default();
        if table.has(Column::UserType) {
            stats.user_types = Some(value_counts(
                records.iter().filter_map(|r| r.user_type.as_deref()),
            ));
        }
        if table.has(Column::Gender) {
            stats.genders = Some(value_counts(
                records.iter().filter_map(|r| r.gender.as_deref()),
            ));
        }
        if table.has(Column::BirthYear) {
            let years: Vec<i32> = records.iter().filter_map(|r| r.birth_year).collect();
            stats.birth_years = match (years.iter().min(), years.iter().max()) {
                (Some(&earliest), Some(&latest)) => mode(years.iter().copied()).map(|most_common| {
                    BirthYears {
                        earliest,
                        latest,
                        most_common,
                    }
                }),
                _ => None,
            };
        }
        stats
    }

    pub fn render<C: Console + ?Sized>(&self, console: &mut C) {
        if let Some(counts) = &self.user_types {
            render_counts(console, "Counts of User Types:", counts);
        }
        if let Some(counts) = &self.genders {
            console.say("");
            render_counts(console, "Counts of Gender:", counts);
        }
        if let Some(years) = &self.birth_years {
            console.say("");
            console.say(&format!("Earliest year of birth: {}", years.earliest));
            console.say(&format!("Most recent year of birth: {}", years.latest));
            console.say(&format!("Most common year of birth: {}", years.most_common));
        }
    }
}

fn render_counts<C: Console + ?Sized>(console: &mut C, title: &str, counts: &[(String, usize)]) {
    console.say(title);
    let width = counts.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    for (label, count) in counts {
        console.say(&format!("  {label:<width$}  {count}"));
    }
}

fn timed_block<C, F>(console: &mut C, heading: &str, body: F)
where
    C: Console + ?Sized,
    F: FnOnce(&mut C),
{
    console.say("");
    console.say(heading);
    console.say("");
    let started = Instant::now();
    body(console);
    console.say("");
    console.say(&format!(
        "This took {} seconds.",
        started.elapsed().as_secs_f64()
    ));
    console.say(SEPARATOR);
}

pub fn time_stats<C: Console + ?Sized>(table: &TripTable, console: &mut C) {
    timed_block(
        console,
        "Calculating The Most Frequent Times of Travel...",
        |c| TimeStats::compute(table).render(c),
    );
}

pub fn station_stats<C: Console + ?Sized>(table: &TripTable, console: &mut C) {
    timed_block(
        console,
        "Calculating The Most Popular Stations and Trip...",
        |c| StationStats::compute(table).render(c),
    );
}

pub fn trip_duration_stats<C: Console + ?Sized>(table: &TripTable, console: &mut C) {
    timed_block(console, "Calculating Trip Duration...", |c| {
        if let Some(stats) = DurationStats::compute(table) {
            stats.render(c);
        }
    });
}

pub fn user_stats<C: Console + ?Sized>(table: &TripTable, console: &mut C) {
    timed_block(console, "Calculating User Stats...", |c| {
        UserStats::compute(table).render(c)
    });
}

/// All four blocks, in display order.
pub fn report_all<C: Console + ?Sized>(table: &TripTable, console: &mut C) {
    time_stats(table, console);
    station_stats(table, console);
    trip_duration_stats(table, console);
    user_stats(table, console);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::ScriptedConsole;
    use crate::loader::read_table;

    const TRIPS: &str = "\
Start Time,End Time,Start Station,End Station,User Type,Gender,Birth Year
2017-01-02 08:00:00,2017-01-02 08:20:30,Canal St,Wacker Dr,Subscriber,Male,1989.0
2017-01-03 08:15:00,2017-01-03 08:25:00,Canal St,State St,Customer,,
2017-02-06 10:00:00,2017-02-06 10:05:00,State St,Canal St,Subscriber,Female,1992.0
2017-01-09 17:00:00,2017-01-09 17:45:00,Canal St,Wacker Dr,Subscriber,Male,1989.0
";

    fn table(csv: &str) -> TripTable {
        read_table(csv.as_bytes(), "", "").unwrap()
    }

    #[test]
    fn mode_prefers_smallest_on_ties() {
        assert_eq!(mode([3, 1, 3, 1, 2]), Some(1));
        assert_eq!(mode(["b", "a", "b"]), Some("b"));
        assert_eq!(mode(Vec::<u32>::new()), None);
    }

    #[test]
    fn value_counts_sorts_by_count_then_label() {
        let counts = value_counts(["b", "a", "c", "a", "c"]);
        assert_eq!(
            counts,
            vec![("a".to_string(), 2), ("c".to_string(), 2), ("b".to_string(), 1)]
        );
    }

    #[test]
    fn time_stats_pick_most_frequent() {
        let stats = TimeStats::compute(&table(TRIPS));
        assert_eq!(stats.month, Some(1));
        assert_eq!(stats.day_of_week, Some("Monday"));
        assert_eq!(stats.hour, Some(8));
    }

    #[test]
    fn station_stats_include_route() {
        let stats = StationStats::compute(&table(TRIPS));
        assert_eq!(stats.start_station.as_deref(), Some("Canal St"));
        assert_eq!(stats.end_station.as_deref(), Some("Wacker Dr"));
        assert_eq!(stats.route.as_deref(), Some("Canal St -> Wacker Dr"));
    }

    #[test]
    fn duration_in_whole_minutes() {
        let stats = DurationStats::compute(&table(TRIPS)).unwrap();
        assert_eq!(stats.total_minutes, 20 + 10 + 5 + 45);
        assert_eq!(stats.mean_minutes, Some(20.0));
    }

    #[test]
    fn user_stats_count_and_birth_years() {
        let stats = UserStats::compute(&table(TRIPS));
        assert_eq!(
            stats.user_types,
            Some(vec![("Subscriber".to_string(), 3), ("Customer".to_string(), 1)])
        );
        assert_eq!(
            stats.genders,
            Some(vec![("Male".to_string(), 2), ("Female".to_string(), 1)])
        );
        assert_eq!(
            stats.birth_years,
            Some(BirthYears {
                earliest: 1989,
                latest: 1992,
                most_common: 1989,
            })
        );
    }

    #[test]
    fn missing_columns_are_skipped() {
        let t = table("Start Time,Start Station\n2017-03-01 10:00:00,Canal St\n");
        assert_eq!(DurationStats::compute(&t), None);
        let stations = StationStats::compute(&t);
        assert_eq!(stations.start_station.as_deref(), Some("Canal St"));
        assert_eq!(stations.route, None);
        assert_eq!(UserStats::compute(&t), UserStats::default());
    }

    #[test]
    fn no_start_time_means_no_time_stats() {
        let t = table("End Station\nCanal St\n");
        assert_eq!(TimeStats::compute(&t), TimeStats::default());
    }

    #[test]
    fn report_all_prints_four_blocks() {
        let mut console = ScriptedConsole::default();
        report_all(&table(TRIPS), &mut console);
        let out = console.transcript();
        assert!(out.contains("Most Common Month: 1"));
        assert!(out.contains("Most Common Day of Week: Monday"));
        assert!(out.contains("Most Common Start Hour: 8"));
        assert!(out.contains("Total Travel Time: 80 mins"));
        assert!(out.contains("Mean Travel Time: 20.00 mins"));
        assert!(out.contains("Most common year of birth: 1989"));
        assert_eq!(out.matches("This took").count(), 4);
        assert_eq!(out.matches(SEPARATOR).count(), 4);
    }
}
