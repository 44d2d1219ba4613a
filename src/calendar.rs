// Validators: turn free text typed at the prompt into cities, months and
// weekdays. Month and day names must be typed exactly as written in
// English ("January", "Monday"); city names are matched case-insensitively.

use chrono::{Month, Weekday};
use std::fmt;

/// Full English month names, January first.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Full English weekday names, Monday first (Monday = 0).
pub const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// The three cities with trip data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum City {
    Chicago,
    NewYork,
    Washington,
}

impl City {
    pub const ALL: [City; 3] = [City::Chicago, City::NewYork, City::Washington];

    /// Name as shown to the user and accepted at the prompt.
    pub fn name(self) -> &'static str {
        match self {
            City::Chicago => "Chicago",
            City::NewYork => "New York",
            City::Washington => "Washington",
        }
    }

    /// Backing CSV file, relative to the data directory.
    pub fn file_name(self) -> &'static str {
        match self {
            City::Chicago => "chicago.csv",
            City::NewYork => "new_york_city.csv",
            City::Washington => "washington.csv",
        }
    }

    /// Case-insensitive lookup. Empty text never matches.
    pub fn parse(text: &str) -> Option<City> {
        if text.is_empty() {
            return None;
        }
        City::ALL
            .into_iter()
            .find(|city| city.name().eq_ignore_ascii_case(text))
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub fn is_known_city(text: &str) -> bool {
    City::parse(text).is_some()
}

/// Parse a full month name ("March") into a month. Wrong case,
/// abbreviations and empty text are rejected.
pub fn normalize_month(text: &str) -> Option<Month> {
    let index = MONTH_NAMES.iter().position(|name| *name == text)?;
    Month::try_from(index as u8 + 1).ok()
}

/// Parse a full weekday name ("Monday") into a weekday.
///
/// Monday is a valid result like any other: callers get `Some(Weekday::Mon)`,
/// whose index from [`day_index`] is 0.
pub fn normalize_day(text: &str) -> Option<Weekday> {
    let index = DAY_NAMES.iter().position(|name| *name == text)?;
    Some(WEEKDAYS[index])
}

/// Month number, 1 to 12.
pub fn month_index(month: Month) -> u32 {
    month.number_from_month()
}

/// Weekday number, Monday = 0 through Sunday = 6.
pub fn day_index(day: Weekday) -> u32 {
    day.num_days_from_monday()
}

pub fn day_name(day: Weekday) -> &'static str {
    DAY_NAMES[day.num_days_from_monday() as usize]
}

/// Upper-case the first letter of every word and lower-case the rest,
/// so "monday" and "MONDAY" both become "Monday".
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }
    out
}
