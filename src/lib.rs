// Library root
// -----------
// This crate exposes the pieces of the bikeshare explorer. The binary
// (`main.rs`) builds a configuration and a terminal console and hands them
// to `session`, which drives the interactive loop.
//
// Module responsibilities:
// - `calendar`: city, month and weekday validators.
// - `schema`: column names and the per-table column capability check.
// - `table` / `loader`: reading a city CSV, deriving month and weekday,
//   applying the month-or-day filter.
// - `console`: the terminal seam (real terminal or scripted answers).
// - `filters`: the question-and-answer state machine for city and filter.
// - `stats` / `pager`: reports over a loaded table and raw row paging.
// - `session`: ties a round together and offers a restart.
pub mod calendar;
pub mod config;
pub mod console;
pub mod error;
pub mod filters;
pub mod loader;
pub mod pager;
pub mod schema;
pub mod session;
pub mod stats;
pub mod table;

pub use config::Config;
pub use error::LoadError;
pub use session::Session;
