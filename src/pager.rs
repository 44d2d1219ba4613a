use std::io;
use std::ops::Range;

use crate::console::Console;
use crate::table::TripTable;

pub const MORE_PROMPT: &str = "Would you like to see more raw data? Enter 'yes' or 'no': ";
pub const EXHAUSTED: &str = "No more raw data to display.";

pub fn first_prompt(page_size: usize) -> String {
    format!("Would you like to see {page_size} lines of raw data? Enter 'yes' or 'no': ")
}

/// Forward-only window over table rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    start: usize,
    size: usize,
}

impl PageCursor {
    pub fn new(size: usize) -> Self {
        Self { start: 0, size }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    /// The next window of a `len`-row table, or `None` once past the end.
    /// Advances the cursor; never wraps.
    pub fn advance(&mut self, len: usize) -> Option<Range<usize>> {
        if self.start >= len || self.size == 0 {
            return None;
        }
        let end = (self.start + self.size).min(len);
        let window = self.start..end;
        self.start += self.size;
        Some(window)
    }
}

/// Only the exact answer `yes` shows another page.
fn is_affirmative(answer: &str) -> bool {
    answer == "yes"
}

/// Show the table `page_size` rows at a time for as long as the user
/// answers `yes`. Any other answer stops paging for good.
pub fn show_raw_data<C: Console + ?Sized>(
    table: &TripTable,
    page_size: usize,
    console: &mut C,
) -> io::Result<()> {
    let mut cursor = PageCursor::new(page_size);
    let mut prompt = first_prompt(page_size);
    loop {
        let answer = console.read_line(&prompt)?;
        if !is_affirmative(&answer) {
            return Ok(());
        }
        let Some(window) = cursor.advance(table.len()) else {
            console.say(EXHAUSTED);
            return Ok(());
        };
        for (index, record) in table.rows(window.start, window.end).iter().enumerate() {
            console.say(&format!("{} {}", window.start + index, table.row_json(record)));
        }
        prompt = MORE_PROMPT.to_string();
    }
}
