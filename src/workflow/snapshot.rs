use tracing::debug;

use crate::domain::ticket::{TicketKey, TicketSnapshot};
use crate::error::{AppError, AppResult};
use crate::services::IssueTrackerService;

/// Fetches a fresh snapshot of the ticket; nothing is cached between calls.
pub async fn load_snapshot(
    tracker: &dyn IssueTrackerService,
    key: &TicketKey,
) -> AppResult<TicketSnapshot> {
    let record = tracker
        .get_issue(key)
        .await
        .map_err(|err| AppError::LookupFailed {
            key: key.to_string(),
            reason: err.to_string(),
        })?;
    debug!(key = %key, id = %record.handle.id, status = %record.status, "loaded ticket");
    Ok(TicketSnapshot::from_record(record))
}
