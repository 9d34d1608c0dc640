use crate::answer_validator::ScoreSummary;
use crate::banner::BannerTier;
use crate::session::SessionRecord;
use colored::Colorize;
use std::fmt::Write;

/// Plain-text score card: totals line followed by one line per operation
pub fn format_summary(summary: &ScoreSummary) -> String {
    let mut out = format!(
        "Total: {} | Correct: {} | Incorrect: {} | Score: {}%",
        summary.total, summary.correct, summary.incorrect, summary.percentage
    );
    for (operation, tally) in &summary.breakdown {
        let _ = write!(
            out,
            "\n  {}: {}/{} ({}%)",
            operation.display_name(),
            tally.correct,
            tally.total,
            tally.percentage()
        );
    }
    out
}

/// One saved session, as printed by `session_history`
pub fn format_session(index: usize, record: &SessionRecord) -> String {
    let header = format!(
        "Session #{} - {}",
        index + 1,
        record.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    );
    let mut out = format!("{}\n{}", header.bold(), "-".repeat(header.chars().count()));

    match &record.score_summary {
        Some(summary) => {
            let score = format!("{}%", summary.percentage);
            let score = if summary.percentage >= 80 {
                score.green()
            } else if summary.percentage >= 60 {
                score.yellow()
            } else {
                score.red()
            };
            let _ = write!(out, "\n{}", format_summary(summary));
            let _ = write!(
                out,
                "\nResult: {} {}",
                score,
                BannerTier::for_summary(summary).message()
            );
        }
        None => {
            let answered = record
                .answers
                .values()
                .filter(|raw| !raw.trim().is_empty())
                .count();
            let _ = write!(
                out,
                "\n{} problem(s), {} answered, {}",
                record.problems.len(),
                answered,
                "not scored".dimmed()
            );
        }
    }

    out
}
