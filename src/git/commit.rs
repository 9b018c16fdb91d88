//! Conversion of git commits into pull request records.

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset};
use git2::Commit;

use crate::data::PullRequest;

/// Splits a trailing `(#N)` off a commit subject.
///
/// Returns the trimmed title and the number when present.
pub fn split_pr_number(subject: &str) -> (&str, Option<u64>) {
    let trimmed = subject.trim_end();
    let Some(without_close) = trimmed.strip_suffix(')') else {
        return (trimmed, None);
    };
    let Some(open) = without_close.rfind("(#") else {
        return (trimmed, None);
    };

    match without_close[open + 2..].parse::<u64>() {
        Ok(number) => (without_close[..open].trim_end(), Some(number)),
        Err(_) => (trimmed, None),
    }
}

/// Builds a pull request record from a commit.
///
/// Returns `None` for commits with an empty subject.
pub fn pull_request_from_commit(commit: &Commit<'_>) -> Result<Option<PullRequest>> {
    let message = commit.message().unwrap_or("");
    let (subject, body) = message.split_once('\n').unwrap_or((message, ""));

    if subject.trim().is_empty() {
        tracing::debug!("Skipping commit {} with empty subject", commit.id());
        return Ok(None);
    }

    let (title, number) = split_pr_number(subject);

    let when = commit.time();
    let offset = FixedOffset::east_opt(when.offset_minutes() * 60)
        .context("Invalid commit timezone offset")?;
    let merged_at = DateTime::from_timestamp(when.seconds(), 0)
        .context("Invalid commit timestamp")?
        .with_timezone(&offset);

    Ok(Some(PullRequest {
        number,
        title: title.to_string(),
        body: body.trim().to_string(),
        author: commit.author().name().unwrap_or("").to_string(),
        merged_at: Some(merged_at),
        ..Default::default()
    }))
}
