//! URL input collection: positional arguments, piped stdin, or an interactive prompt.

use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::{Context, Result};

/// Prompt shown before reading URLs interactively.
pub const INTERACTIVE_PROMPT: &str = "Enter image URLs, one per line (empty line to finish):";

/// Returns the URLs to fetch.
///
/// Positional arguments win. Otherwise piped stdin is read to the end, and a
/// terminal stdin is prompted until the first empty line.
pub fn collect_urls(positional: &[String]) -> Result<Vec<String>> {
    if !positional.is_empty() {
        return Ok(positional
            .iter()
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .collect());
    }

    let stdin = io::stdin();
    if stdin.is_terminal() {
        println!("{INTERACTIVE_PROMPT}");
        io::stdout().flush().context("Failed to flush prompt")?;
        read_url_lines(stdin.lock(), true).context("Failed to read URLs from terminal")
    } else {
        read_url_lines(stdin.lock(), false).context("Failed to read URLs from stdin")
    }
}

/// Reads one URL per line, trimming whitespace.
///
/// With `stop_at_blank`, the first empty line ends input (interactive mode);
/// otherwise blank lines are skipped and input runs to EOF.
pub fn read_url_lines<R: BufRead>(reader: R, stop_at_blank: bool) -> io::Result<Vec<String>> {
    let mut urls = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            if stop_at_blank {
                break;
            }
            continue;
        }
        urls.push(trimmed.to_string());
    }
    Ok(urls)
}
