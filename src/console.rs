// Terminal seam. Every prompt and every line of output goes through a
// `Console`, so the interactive flows run the same against a real terminal
// and against a scripted one in tests.

use std::collections::VecDeque;
use std::io::{self, BufRead, IsTerminal, Write};

use crossterm::style::Stylize;
use dialoguer::Input;

pub trait Console {
    /// Show `prompt` and read one line of input, without the line ending.
    /// Returns `UnexpectedEof` when input is exhausted.
    fn read_line(&mut self, prompt: &str) -> io::Result<String>;

    /// Print a line of regular output.
    fn say(&mut self, text: &str);

    /// Print a line the user should notice, such as a rejected answer.
    fn warn(&mut self, text: &str);
}

/// The real terminal. Uses `dialoguer` for line editing when stdin is a
/// terminal and falls back to plain reads when input is piped.
pub struct TerminalConsole {
    interactive: bool,
}

impl TerminalConsole {
    pub fn new() -> Self {
        Self {
            interactive: io::stdin().is_terminal(),
        }
    }

    fn read_piped(&self, prompt: &str) -> io::Result<String> {
        let mut stdout = io::stdout();
        write!(stdout, "{prompt}")?;
        stdout.flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "end of input"));
        }
        // keep the next output off the prompt line
        println!();
        Ok(strip_line_ending(line))
    }
}

impl Default for TerminalConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for TerminalConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        if !self.interactive {
            return self.read_piped(prompt);
        }
        // dialoguer adds its own ": " after the prompt
        let prompt = prompt.trim_end().trim_end_matches(':');
        Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
    }

    fn say(&mut self, text: &str) {
        println!("{text}");
    }

    fn warn(&mut self, text: &str) {
        println!("{}", text.red());
    }
}

fn strip_line_ending(mut line: String) -> String {
    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }
    line
}

/// A console that replays canned answers and records everything shown.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    answers: VecDeque<String>,
    prompts: Vec<String>,
    output: Vec<String>,
    warnings: Vec<String>,
}

impl ScriptedConsole {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Prompts shown so far, in order.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Every line shown, warnings included, in order.
    pub fn output(&self) -> &[String] {
        &self.output
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn transcript(&self) -> String {
        self.output.join("\n")
    }

    pub fn remaining_answers(&self) -> usize {
        self.answers.len()
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        self.prompts.push(prompt.to_string());
        self.answers
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted"))
    }

    fn say(&mut self, text: &str) {
        self.output.push(text.to_string());
    }

    fn warn(&mut self, text: &str) {
        self.output.push(text.to_string());
        self.warnings.push(text.to_string());
    }
}
