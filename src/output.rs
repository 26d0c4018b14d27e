//! Console output for fetch outcomes and the batch summary.

use std::path::Path;

use image_fetcher_core::{BatchSummary, FetchOutcome, FetchStatus};

/// Message when no URLs were supplied.
pub const NO_INPUT_GUIDANCE: &str = "No URLs provided. Pass them as arguments or pipe them via stdin.";

/// Example for passing URLs as arguments.
pub const INPUT_ARG_EXAMPLE: &str = "Example: image-fetcher https://example.com/photo.jpg";

/// One line describing an outcome, prefixed with its batch position.
pub fn outcome_line(index: usize, total: usize, outcome: &FetchOutcome) -> String {
    let label = match outcome.status() {
        FetchStatus::Success => "ok",
        FetchStatus::Skipped => "skipped",
        FetchStatus::Failed(_) => "failed",
    };
    format!(
        "[{}/{total}] {label}: {} ({})",
        index + 1,
        outcome.message(),
        outcome.url()
    )
}

/// Summary lines for the end of a run.
pub fn summary_lines(summary: &BatchSummary, output_dir: &Path) -> Vec<String> {
    let mut lines = vec![
        format!(
            "Summary: {} saved, {} skipped (duplicates), {} failed, {} total",
            summary.succeeded,
            summary.skipped,
            summary.failed,
            summary.total()
        ),
        format!("Images stored in: {}", output_dir.display()),
    ];

    if !summary.saved_paths.is_empty() {
        lines.push("Saved:".to_string());
        lines.extend(
            summary
                .saved_paths
                .iter()
                .map(|path| format!("  {}", path.display())),
        );
    }

    if !summary.failures.is_empty() {
        lines.push("Failures:".to_string());
        lines.extend(
            summary
                .failures
                .iter()
                .map(|(url, message)| format!("  {url}: {message}")),
        );
    }

    lines
}

pub fn print_outcomes(outcomes: &[FetchOutcome]) {
    for (index, outcome) in outcomes.iter().enumerate() {
        println!("{}", outcome_line(index, outcomes.len(), outcome));
    }
}

pub fn print_summary(summary: &BatchSummary, output_dir: &Path) {
    println!();
    for line in summary_lines(summary, output_dir) {
        println!("{line}");
    }
}

pub fn print_no_input_guidance() {
    println!("{NO_INPUT_GUIDANCE}");
    println!("{INPUT_ARG_EXAMPLE}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use image_fetcher_core::FetchError;

    #[test]
    fn test_outcome_line_labels_status() {
        let saved = FetchOutcome::saved("https://a/p.jpg", PathBuf::from("d/p.jpg"), 1024);
        assert_eq!(
            outcome_line(0, 2, &saved),
            "[1/2] ok: saved p.jpg (1.0KB, 1024 bytes) (https://a/p.jpg)"
        );

        let failed = FetchOutcome::failed("bad", &FetchError::invalid_url("bad"));
        assert!(outcome_line(1, 2, &failed).starts_with("[2/2] failed: invalid URL"));
    }

    #[test]
    fn test_summary_lines_lists_saved_and_failures() {
        let outcomes = vec![
            FetchOutcome::saved("https://a/p.jpg", PathBuf::from("d/p.jpg"), 1),
            FetchOutcome::failed("https://a/x", &FetchError::http_status("https://a/x", 404)),
        ];
        let summary = BatchSummary::from_outcomes(&outcomes);
        let lines = summary_lines(&summary, Path::new("d"));

        assert_eq!(lines[0], "Summary: 1 saved, 0 skipped (duplicates), 1 failed, 2 total");
        assert!(lines.iter().any(|l| l == "  d/p.jpg"));
        assert!(lines.iter().any(|l| l.starts_with("  https://a/x: server returned 404")));
    }

    #[test]
    fn test_summary_lines_omit_empty_sections() {
        let lines = summary_lines(&BatchSummary::default(), Path::new("d"));
        assert_eq!(lines.len(), 2);
    }
}
