use async_trait::async_trait;

use crate::domain::ticket::{IssueHandle, IssueRecord, TicketKey};
use crate::domain::transition::Transition;
use crate::error::AppResult;

/// Authenticated session against the issue tracker.
#[async_trait]
pub trait IssueTrackerService: Send + Sync {
    /// Identity the session acts as; used to attribute comments.
    fn identity(&self) -> &str;

    async fn get_issue(&self, key: &TicketKey) -> AppResult<IssueRecord>;
    async fn list_transitions(&self, issue: &IssueHandle) -> AppResult<Vec<Transition>>;
    async fn add_comment(&self, issue: &IssueHandle, body: &str) -> AppResult<()>;
    async fn apply_transition(&self, issue: &IssueHandle, transition_id: &str) -> AppResult<()>;
}
