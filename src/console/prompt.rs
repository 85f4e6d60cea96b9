//! Interactive console input.
//!
//! Wraps a rustyline editor with the small prompt shapes the demos need:
//! free text, yes/no, numbered menus, and existing-file loops.

use std::path::PathBuf;

use anyhow::{Context, Result};
use rustyline::DefaultEditor;

/// Interactive prompt backed by a line editor with history.
pub struct Console {
    editor: DefaultEditor,
}

impl Console {
    /// Create a console prompt.
    ///
    /// # Errors
    /// Returns an error if the line editor cannot be initialized.
    pub fn new() -> Result<Self> {
        let editor = DefaultEditor::new().context("Failed to initialize line editor")?;
        Ok(Self { editor })
    }

    /// Ask for one line of input, trimmed.
    ///
    /// # Errors
    /// Returns an error if input is aborted (Ctrl-C / Ctrl-D).
    pub fn ask(&mut self, prompt: &str) -> Result<String> {
        let line = self.editor.readline(&format!("{} > ", prompt)).context("Input aborted")?;
        let _ = self.editor.add_history_entry(&line);
        Ok(line.trim().to_string())
    }

    /// Ask a yes/no question. Anything other than y/yes counts as no.
    pub fn confirm(&mut self, prompt: &str) -> Result<bool> {
        let answer = self.ask(&format!("{} (Y/N)", prompt))?;
        Ok(parse_yes(&answer))
    }

    /// Present a numbered menu and return the selected option.
    ///
    /// Re-prompts until the answer is a valid option number.
    pub fn choose<'a>(&mut self, prompt: &str, options: &[&'a str]) -> Result<&'a str> {
        println!("{}", prompt);
        for (index, option) in options.iter().enumerate() {
            println!("  {}. {}", index + 1, option);
        }

        loop {
            let answer = self.ask("Enter a number")?;
            match parse_choice(&answer, options.len()) {
                Some(index) => return Ok(options[index]),
                None => println!("Please enter a number between 1 and {}.", options.len()),
            }
        }
    }

    /// Ask for a path until the file exists.
    pub fn existing_path(&mut self, prompt: &str) -> Result<PathBuf> {
        loop {
            let answer = self.ask(prompt)?;
            let path = PathBuf::from(&answer);
            if path.is_file() {
                return Ok(path);
            }
            println!("The file does not exist. Please enter a valid path.");
        }
    }
}

/// Interpret a yes/no answer; only y/yes (any case) is a yes.
pub fn parse_yes(answer: &str) -> bool {
    let answer = answer.trim();
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}

/// Parse a 1-based menu answer into a 0-based index.
pub fn parse_choice(answer: &str, option_count: usize) -> Option<usize> {
    answer.trim().parse::<usize>().ok().filter(|n| (1..=option_count).contains(n)).map(|n| n - 1)
}
