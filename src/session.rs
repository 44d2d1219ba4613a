// Session loop: one round is filters -> load -> four statistics blocks ->
// raw data pager, then the user is asked whether to go again. Nothing that
// goes wrong inside a round ends the process; only declining the restart
// (or closing stdin) does.

use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use crate::config::Config;
use crate::console::Console;
use crate::error::LoadError;
use crate::filters::{get_filters, FilterAxis, FilterSelection, SEPARATOR};
use crate::loader::TripLoader;
use crate::pager::show_raw_data;
use crate::stats::report_all;
use crate::table::TripTable;

pub const RESTART_PROMPT: &str = "Would you like to restart? Enter yes or no: ";

/// What one round produced.
#[derive(Debug)]
pub struct Round {
    pub selection: FilterSelection,
    pub outcome: std::result::Result<TripTable, LoadError>,
}

impl Round {
    /// True when statistics were shown, i.e. the load succeeded with rows.
    pub fn reported(&self) -> bool {
        matches!(&self.outcome, Ok(table) if !table.is_empty())
    }
}

pub struct Session {
    config: Config,
    loader: TripLoader,
}

impl Session {
    pub fn new(config: Config) -> Self {
        let loader = TripLoader::new(&config);
        Self { config, loader }
    }

    /// Run rounds until the user declines to restart or input ends.
    pub fn run<C: Console + ?Sized>(&self, console: &mut C) -> Result<()> {
        loop {
            match self.run_round(console) {
                Ok(round) => debug!(reported = round.reported(), "round finished"),
                Err(err) if is_eof(&err) => return Ok(()),
                Err(err) => return Err(err).context("Failed to read from the terminal"),
            }

            console.say("");
            let answer = match console.read_line(RESTART_PROMPT) {
                Ok(answer) => answer,
                Err(err) if is_eof(&err) => return Ok(()),
                Err(err) => return Err(err).context("Failed to read restart answer"),
            };
            if !answer.trim().eq_ignore_ascii_case("yes") {
                info!("user ended the session");
                return Ok(());
            }
        }
    }

    /// One round. Load failures and empty tables skip the reports; only
    /// console errors are returned as `Err`.
    pub fn run_round<C: Console + ?Sized>(&self, console: &mut C) -> io::Result<Round> {
        let selection = get_filters(console, self.config.debug)?;
        if self.config.debug {
            console.say(&describe(&selection));
            console.say(SEPARATOR);
        }

        let outcome = self.load_with_spinner(&selection);
        match &outcome {
            Ok(table) if !table.is_empty() => {
                report_all(table, console);
                show_raw_data(table, self.config.page_size, console)?;
            }
            Ok(_) => debug!(city = %selection.city, "no trips match the selection"),
            Err(err) => {
                if self.config.debug {
                    console.say(&format!("[debug] load failed: {err:?}"));
                }
            }
        }
        Ok(Round { selection, outcome })
    }

    fn load_with_spinner(
        &self,
        selection: &FilterSelection,
    ) -> std::result::Result<TripTable, LoadError> {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(format!("Loading {} trips...", selection.city));
        spinner.enable_steady_tick(Duration::from_millis(100));
        let outcome = self.loader.load_selection(selection);
        spinner.finish_and_clear();
        outcome
    }
}

fn is_eof(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::UnexpectedEof
}

fn describe(selection: &FilterSelection) -> String {
    match &selection.axis {
        FilterAxis::None => format!("accessing data of city {}...", selection.city),
        FilterAxis::Day(day) => format!("accessing data of city {} on {day}...", selection.city),
        FilterAxis::Month(month) => {
            format!("accessing data of city {} in {month}...", selection.city)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::City;

    #[test]
    fn describe_mentions_filter() {
        let sel = FilterSelection {
            city: City::Chicago,
            axis: FilterAxis::Day("Monday".into()),
        };
        assert_eq!(describe(&sel), "accessing data of city Chicago on Monday...");
        assert_eq!(
            describe(&FilterSelection::unfiltered(City::NewYork)),
            "accessing data of city New York..."
        );
    }

    #[test]
    fn failed_load_is_not_reported() {
        let round = Round {
            selection: FilterSelection::unfiltered(City::Chicago),
            outcome: Err(LoadError::UnknownCity("Chicago".into())),
        };
        assert!(!round.reported());
    }
}
