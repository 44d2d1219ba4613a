// Filter prompt: asks for a city, then how to filter, then the month or day,
// re-asking until every answer is valid.
//
// The flow is an explicit state machine. A rejected city sends the user back
// to the city question; a rejected month or day keeps the city and the filter
// choice and asks for the month or day again.

use std::io;

use chrono::{Month, Weekday};
use tracing::debug;

use crate::calendar::{normalize_day, normalize_month, City};
use crate::console::Console;

pub const GREETING: &str = "Hello! Let's explore some US bikeshare data!";
pub const SEPARATOR: &str = "----------------------------------------";

pub const CITY_PROMPT: &str = "Would you like to see data for Chicago, New York, or Washington? \
Please enter 'Chicago' or 'New York' or 'Washington': ";
pub const FILTER_PROMPT: &str = "Would you like to filter the data by month, day, or not at all? \
Please enter 'month' or 'day' or 'not at all' or any other character(s) for no filter: ";
pub const MONTH_PROMPT: &str = "Which month - January, February, March, April, May, or June? ";
pub const DAY_PROMPT: &str =
    "Which day - Monday, Tuesday, Wednesday, Thursday, Friday, Saturday, or Sunday? ";

pub const INVALID_CITY: &str = "Please enter a valid city name.";
pub const INVALID_MONTH: &str = "Please enter a valid month name.";
pub const INVALID_DAY_OF_WEEK: &str = "Please enter a valid day of week.";

/// The single axis rows are filtered on, holding the validated text exactly
/// as typed. The loader normalizes it again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterAxis {
    None,
    Month(String),
    Day(String),
}

/// A complete, validated answer to the filter questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelection {
    pub city: City,
    pub axis: FilterAxis,
}

impl FilterSelection {
    pub fn unfiltered(city: City) -> Self {
        Self {
            city,
            axis: FilterAxis::None,
        }
    }

    /// Month text, or "" when not filtering by month.
    pub fn month_text(&self) -> &str {
        match &self.axis {
            FilterAxis::Month(text) => text,
            _ => "",
        }
    }

    /// Day text, or "" when not filtering by day.
    pub fn day_text(&self) -> &str {
        match &self.axis {
            FilterAxis::Day(text) => text,
            _ => "",
        }
    }

    pub fn month(&self) -> Option<Month> {
        normalize_month(self.month_text())
    }

    pub fn day(&self) -> Option<Weekday> {
        normalize_day(self.day_text())
    }
}

/// Answer to the "filter by" question. Only the exact words `month` and
/// `day` select a filter; any other answer, "no" and "none" included, means
/// no filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterChoice {
    Month,
    Day,
    None,
}

impl FilterChoice {
    pub fn parse(text: &str) -> Self {
        match text {
            "month" => FilterChoice::Month,
            "day" => FilterChoice::Day,
            _ => FilterChoice::None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterState {
    AwaitCity,
    AwaitFilterChoice { city: City },
    AwaitMonth { city: City },
    AwaitDayOfWeek { city: City },
    NoFilter { city: City },
    Done(FilterSelection),
}

/// Drives [`FilterState`] against a console.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterPrompt {
    debug: bool,
}

impl FilterPrompt {
    pub fn new(debug: bool) -> Self {
        Self { debug }
    }

    /// Run from `AwaitCity` to `Done`.
    pub fn run<C: Console + ?Sized>(&self, console: &mut C) -> io::Result<FilterSelection> {
        let mut state = FilterState::AwaitCity;
        loop {
            state = match self.step(state, console)? {
                FilterState::Done(selection) => return Ok(selection),
                next => next,
            };
        }
    }

    /// Advance one state, asking at most one question.
    pub fn step<C: Console + ?Sized>(
        &self,
        state: FilterState,
        console: &mut C,
    ) -> io::Result<FilterState> {
        let next = match state {
            FilterState::AwaitCity => {
                let text = console.read_line(CITY_PROMPT)?;
                match City::parse(&text) {
                    Some(city) => FilterState::AwaitFilterChoice { city },
                    None => {
                        self.reject(console, INVALID_CITY, "city", &text);
                        FilterState::AwaitCity
                    }
                }
            }
            FilterState::AwaitFilterChoice { city } => {
                let text = console.read_line(FILTER_PROMPT)?;
                match FilterChoice::parse(&text) {
                    FilterChoice::Month => FilterState::AwaitMonth { city },
                    FilterChoice::Day => FilterState::AwaitDayOfWeek { city },
                    FilterChoice::None => FilterState::NoFilter { city },
                }
            }
            FilterState::AwaitMonth { city } => {
                let text = console.read_line(MONTH_PROMPT)?;
                if normalize_month(&text).is_some() {
                    FilterState::Done(FilterSelection {
                        city,
                        axis: FilterAxis::Month(text),
                    })
                } else {
                    self.reject(console, INVALID_MONTH, "month", &text);
                    FilterState::AwaitMonth { city }
                }
            }
            FilterState::AwaitDayOfWeek { city } => {
                let text = console.read_line(DAY_PROMPT)?;
                if normalize_day(&text).is_some() {
                    FilterState::Done(FilterSelection {
                        city,
                        axis: FilterAxis::Day(text),
                    })
                } else {
                    self.reject(console, INVALID_DAY_OF_WEEK, "day", &text);
                    FilterState::AwaitDayOfWeek { city }
                }
            }
            FilterState::NoFilter { city } => FilterState::Done(FilterSelection::unfiltered(city)),
            done @ FilterState::Done(_) => done,
        };
        Ok(next)
    }

    fn reject<C: Console + ?Sized>(&self, console: &mut C, message: &str, what: &str, text: &str) {
        debug!(input = text, "rejected {what}");
        console.warn(message);
        if self.debug {
            console.say(&format!("[debug] {what} input {text:?} did not validate"));
        }
    }
}

/// Greet the user, collect a validated selection and print the separator.
pub fn get_filters<C: Console + ?Sized>(console: &mut C, debug: bool) -> io::Result<FilterSelection> {
    console.say(GREETING);
    let selection = FilterPrompt::new(debug).run(console)?;
    console.say(SEPARATOR);
    Ok(selection)
}
