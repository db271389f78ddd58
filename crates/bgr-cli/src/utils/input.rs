//! User input utilities for interactive prompts.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

/// Parse a yes/no answer. Empty input means no; anything unrecognised is
/// `None`.
pub fn parse_confirmation(input: &str) -> Option<bool> {
    match input.trim().to_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" | "" => Some(false),
        _ => None,
    }
}

/// Prompts the user for a yes/no confirmation on stderr.
///
/// Accepts 'y', 'yes', 'n', 'no' (case insensitive). Empty input and end of
/// input are treated as 'no'.
pub fn prompt_confirmation(prompt: &str) -> Result<bool> {
    let stdin = io::stdin();
    let mut stderr = io::stderr();

    loop {
        write!(stderr, "{prompt} (y/N): ").context("Failed to write prompt")?;
        stderr.flush().context("Failed to write prompt")?;

        let mut input = String::new();
        let read = stdin
            .lock()
            .read_line(&mut input)
            .context("Failed to read user input")?;
        if read == 0 {
            return Ok(false);
        }

        match parse_confirmation(&input) {
            Some(answer) => return Ok(answer),
            None => eprintln!("Please enter 'y' for yes or 'n' for no."),
        }
    }
}
