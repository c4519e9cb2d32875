use chrono::Local;
use tracing::{info, warn};

use crate::context::AppContext;
use crate::domain::comment::ApprovalComment;
use crate::domain::outcome::WorkflowOutcome;
use crate::domain::ticket::TicketKey;
use crate::domain::transition::TransitionCatalog;
use crate::error::{AppError, AppResult};
use crate::services::OperatorConsole;
use crate::workflow::catalog::{apply_by_name, fetch_catalog};
use crate::workflow::snapshot::load_snapshot;

/// Runs one approval for `key`.
///
/// Collaborator failures come back as `WorkflowOutcome::Failed` for the caller
/// to report; the only error returned is `AppError::Interrupted`, when the
/// operator aborts mid-run.
/// Effects are not rolled back: a posted comment stays even if the transition
/// step fails afterwards.
pub async fn approve_ticket(ctx: &AppContext, key: &TicketKey) -> AppResult<WorkflowOutcome> {
    match run_approval(ctx, key).await {
        Ok(outcome) => {
            info!(key = %key, %outcome, "approval finished");
            Ok(outcome)
        }
        Err(AppError::Interrupted) => Err(AppError::Interrupted),
        Err(err) => {
            warn!(key = %key, error = %err, "approval failed");
            Ok(WorkflowOutcome::Failed(err.to_string()))
        }
    }
}

async fn run_approval(ctx: &AppContext, key: &TicketKey) -> AppResult<WorkflowOutcome> {
    let console = ctx.console.as_ref();
    let tracker = ctx.issue_tracker.as_ref();

    console.info(&format!("Processing ticket: {key}"));
    let snapshot = load_snapshot(tracker, key).await?;
    for line in snapshot.display_lines() {
        console.info(&line);
    }

    console.info(&format!("Should I approve this ticket ({key})?"));
    console.info(&format!("Current status: {}", snapshot.status));
    if !confirm(console, "Enter 'yes' to approve, 'no' to cancel").await? {
        console.failure("Approval cancelled by user");
        return Ok(WorkflowOutcome::Cancelled);
    }

    console.info("Adding approval comment...");
    let comment = ApprovalComment::compose(
        &ctx.config.approval_message,
        tracker.identity(),
        &Local::now(),
    );
    tracker
        .add_comment(&snapshot.handle, comment.as_str())
        .await
        .map_err(|err| AppError::CommentPostFailed(err.to_string()))?;
    console.success("Comment added successfully");

    let catalog = fetch_catalog(tracker, &snapshot.handle).await?;
    if catalog.is_empty() {
        console.info("No transitions available for this ticket");
        console.success("Approval comment added (status unchanged)");
        return Ok(WorkflowOutcome::ApprovedNoTransition);
    }

    let chosen = match catalog.preferred() {
        Some(preferred) => {
            console.info(&format!("Found 'Approved' transition: {}", preferred.name));
            let prompt = format!("Move to '{}' status? (yes/no)", preferred.name);
            if confirm(console, &prompt).await? {
                Some(preferred.name.clone())
            } else {
                choose_manually(console, &catalog).await?
            }
        }
        None => choose_manually(console, &catalog).await?,
    };

    let Some(name) = chosen else {
        console.success("Approval comment added (status unchanged)");
        return Ok(WorkflowOutcome::ApprovedNoTransition);
    };

    let applied = apply_by_name(tracker, &snapshot.handle, &name).await?;
    console.success(&format!("Ticket status changed to: {}", applied.name));
    Ok(WorkflowOutcome::ApprovedAndTransitioned {
        transition: applied.name,
    })
}

/// Asks until the operator answers yes/y or no/n, in any case.
async fn confirm(console: &dyn OperatorConsole, prompt: &str) -> AppResult<bool> {
    loop {
        let answer = console.read_line(prompt).await?;
        match answer.trim().to_lowercase().as_str() {
            "yes" | "y" => return Ok(true),
            "no" | "n" => return Ok(false),
            _ => console.info("Please enter 'yes' or 'no'"),
        }
    }
}

/// Lists the catalog and takes a single numbered choice. Blank or invalid input skips.
async fn choose_manually(
    console: &dyn OperatorConsole,
    catalog: &TransitionCatalog,
) -> AppResult<Option<String>> {
    console.info("Available status transitions:");
    for (index, transition) in catalog.iter().enumerate() {
        console.info(&format!("{}. {}", index + 1, transition.name));
    }
    console.info("Select transition number (or press Enter to skip status change):");

    let choice = console.read_line("Choice").await?;
    match catalog.select(&choice) {
        Ok(selected) => Ok(selected.map(|t| t.name.clone())),
        Err(err) => {
            console.failure(&err.to_string());
            Ok(None)
        }
    }
}
