use chrono::{DateTime, TimeZone};

pub const DEFAULT_APPROVAL_MESSAGE: &str =
    "✅ APPROVED - Ticket has been reviewed and approved for processing.";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Comment body posted on approval. Always ends with the attribution line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovalComment(String);

impl ApprovalComment {
    pub fn compose<Tz>(message: &str, actor: &str, at: &DateTime<Tz>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let timestamp = at.format(TIMESTAMP_FORMAT);
        Self(format!(
            "{}\n\n_Automated approval on {timestamp} by {actor}_",
            message.trim_end()
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
