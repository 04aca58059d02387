// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-facing notices
//!
//! Maps operation results to the messages shown to the user. Partial
//! success, total success and total failure each read differently so the
//! user can tell whether follow-up is needed.

use crate::bulk::{BulkOperation, BulkReport, BulkSummary};
use serde::{Deserialize, Serialize};

/// Notice severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

impl std::fmt::Display for NoticeLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NoticeLevel::Success => write!(f, "success"),
            NoticeLevel::Warning => write!(f, "warning"),
            NoticeLevel::Error => write!(f, "error"),
        }
    }
}

/// A notice to display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, message)
    }

    /// Single resource operation succeeded
    pub fn single_succeeded(operation: BulkOperation, label: &str) -> Self {
        match operation {
            BulkOperation::Save => Self::success(format!("Saved {}", label)),
            BulkOperation::Delete => Self::success(format!("Deleted {}", label)),
        }
    }

    /// Single resource operation failed
    pub fn single_failed(operation: BulkOperation, label: &str, reason: &str) -> Self {
        Self::error(format!("Failed to {} {}: {}", operation, label, reason))
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.level, self.message)
    }
}

fn drafts(n: usize) -> String {
    if n == 1 {
        "1 draft".to_string()
    } else {
        format!("{} drafts", n)
    }
}

fn breakdown(report: &BulkReport) -> String {
    match (report.failed, report.timed_out) {
        (f, 0) => format!("{} failed", f),
        (0, t) => format!("{} timed out", t),
        (f, t) => format!("{} failed, {} timed out", f, t),
    }
}

/// Notices describing a bulk report
///
/// Empty reports produce nothing. Any success yields a success notice; a
/// partial run adds a warning; a run where nothing succeeded is one error.
pub fn notices_for(report: &BulkReport) -> Vec<Notice> {
    let op = report.operation;
    match report.summary() {
        BulkSummary::Empty => Vec::new(),
        BulkSummary::AllSucceeded => vec![Notice::success(capitalize(&format!(
            "{} {}",
            op.past_tense(),
            drafts(report.succeeded)
        )))],
        BulkSummary::Partial => vec![
            Notice::success(capitalize(&format!(
                "{} {}",
                op.past_tense(),
                drafts(report.succeeded)
            ))),
            Notice::warning(format!(
                "Could not {} {} ({})",
                op,
                drafts(report.unsuccessful()),
                breakdown(report)
            )),
        ],
        BulkSummary::AllFailed => vec![Notice::error(format!(
            "Failed to {} {} ({})",
            op,
            drafts(report.unsuccessful()),
            breakdown(report)
        ))],
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
#[path = "notice_tests.rs"]
mod tests;
