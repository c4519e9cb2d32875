use std::fmt;

use crate::error::{AppError, AppResult};

pub const UNASSIGNED: &str = "Unassigned";
pub const UNKNOWN_REPORTER: &str = "Unknown";
pub const NO_DESCRIPTION: &str = "No description provided";

const DESCRIPTION_PREVIEW_CHARS: usize = 100;
const LABEL_WIDTH: usize = 28;
const RULE_WIDTH: usize = 60;

/// A ticket key such as `PROJ-123`, upper-cased on parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketKey(String);

impl TicketKey {
    /// Accepts anything containing a hyphen that is at least three characters long.
    pub fn parse(input: &str) -> AppResult<Self> {
        let trimmed = input.trim();
        if !trimmed.contains('-') || trimmed.chars().count() < 3 {
            return Err(AppError::InvalidInput(
                "Invalid ticket key format. Expected format: PROJECT-NUMBER (e.g., PROJ-123)"
                    .to_string(),
            ));
        }
        Ok(Self(trimmed.to_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TicketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque reference to an issue on the tracker.
///
/// Two handles fetched for the same key are not assumed to be interchangeable;
/// every lookup produces a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueHandle {
    pub key: String,
    pub id: String,
}

/// Raw field values as the tracker reports them.
#[derive(Debug, Clone)]
pub struct IssueRecord {
    pub handle: IssueHandle,
    pub summary: String,
    pub status: String,
    pub assignee: Option<String>,
    pub reporter: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TicketSnapshot {
    pub key: String,
    pub summary: String,
    pub status: String,
    pub assignee: String,
    pub reporter: String,
    pub description: String,
    pub handle: IssueHandle,
}

impl TicketSnapshot {
    pub fn from_record(record: IssueRecord) -> Self {
        Self {
            key: record.handle.key.clone(),
            summary: record.summary,
            status: record.status,
            assignee: record.assignee.unwrap_or_else(|| UNASSIGNED.to_string()),
            reporter: record.reporter.unwrap_or_else(|| UNKNOWN_REPORTER.to_string()),
            description: record
                .description
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            handle: record.handle,
        }
    }

    pub fn description_preview(&self) -> String {
        if self.description.chars().count() > DESCRIPTION_PREVIEW_CHARS {
            let head: String = self
                .description
                .chars()
                .take(DESCRIPTION_PREVIEW_CHARS)
                .collect();
            format!("{head}...")
        } else {
            self.description.clone()
        }
    }

    /// Lines shown to the operator before asking for approval.
    pub fn display_lines(&self) -> Vec<String> {
        let rule = "=".repeat(RULE_WIDTH);
        vec![
            rule.clone(),
            "TICKET INFORMATION".to_string(),
            rule.clone(),
            field_line("Key:", &self.key),
            field_line("Summary:", &self.summary),
            field_line("Status:", &self.status),
            field_line("Assignee:", &self.assignee),
            field_line("Reporter:", &self.reporter),
            field_line("Description:", &self.description_preview()),
            rule,
        ]
    }
}

fn field_line(label: &str, value: &str) -> String {
    format!("{label:<LABEL_WIDTH$}{value}")
}
