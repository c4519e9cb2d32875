use tracing::debug;

use crate::domain::ticket::IssueHandle;
use crate::domain::transition::{Transition, TransitionCatalog};
use crate::error::{AppError, AppResult};
use crate::services::IssueTrackerService;

pub async fn fetch_catalog(
    tracker: &dyn IssueTrackerService,
    issue: &IssueHandle,
) -> AppResult<TransitionCatalog> {
    let transitions = tracker
        .list_transitions(issue)
        .await
        .map_err(|err| AppError::TransitionQueryFailed(err.to_string()))?;
    debug!(key = %issue.key, count = transitions.len(), "listed transitions");
    Ok(TransitionCatalog::new(transitions))
}

/// Applies a transition chosen by name.
///
/// The name is resolved against a freshly listed catalog, not the one the
/// operator picked from; a transition that disappeared in between is an error.
pub async fn apply_by_name(
    tracker: &dyn IssueTrackerService,
    issue: &IssueHandle,
    name: &str,
) -> AppResult<Transition> {
    let catalog = fetch_catalog(tracker, issue).await?;
    let transition = catalog.resolve(name).cloned().ok_or_else(|| {
        AppError::TransitionApplyFailed(format!(
            "transition '{name}' not available. Available transitions: {}",
            catalog.names().join(", ")
        ))
    })?;

    tracker
        .apply_transition(issue, &transition.id)
        .await
        .map_err(|err| AppError::TransitionApplyFailed(err.to_string()))?;
    debug!(key = %issue.key, transition = %transition.name, "applied transition");
    Ok(transition)
}
