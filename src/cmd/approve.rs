use tracing::error;

use crate::context::AppContext;
use crate::domain::outcome::WorkflowOutcome;
use crate::domain::ticket::TicketKey;
use crate::error::{AppError, AppResult};
use crate::workflow::approval::approve_ticket;

const USAGE: &[&str] = &[
    "Commands:",
    "  - Enter a Jira ticket key (e.g., PROJ-123)",
    "  - Type 'quit' or 'exit' to end",
    "  - Type 'help' for this message",
];

const HELP: &[&str] = &[
    "Help:",
    "  - Enter a ticket key like 'PROJ-123', 'ABC-456', etc.",
    "  - The bot will show ticket details and ask for approval",
    "  - Type 'quit' to exit",
];

#[derive(Debug, PartialEq, Eq)]
pub enum DriverCommand {
    Skip,
    Quit,
    Help,
    Approve(TicketKey),
    Invalid(String),
}

pub fn parse_command(input: &str) -> DriverCommand {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return DriverCommand::Skip;
    }
    match trimmed.to_lowercase().as_str() {
        "quit" | "exit" | "q" => DriverCommand::Quit,
        "help" => DriverCommand::Help,
        _ => match TicketKey::parse(trimmed) {
            Ok(key) => DriverCommand::Approve(key),
            Err(AppError::InvalidInput(message)) => DriverCommand::Invalid(message),
            Err(other) => DriverCommand::Invalid(other.to_string()),
        },
    }
}

/// Prompts for ticket keys until the operator quits or interrupts.
///
/// One ticket is handled to completion before the next prompt. A failure on
/// one ticket is reported and the loop carries on. Prompts and whole ticket
/// runs are both raced against the session interrupt, so Ctrl-C during a slow
/// tracker call ends the loop too.
pub async fn run(ctx: &AppContext) -> AppResult<()> {
    let console = ctx.console.as_ref();
    console.info("Chat Interface Started");
    for line in USAGE {
        console.info(line);
    }

    loop {
        console.info(&"-".repeat(40));
        let input = match ctx
            .interrupt
            .guard(console.read_line("Enter Jira ticket key"))
            .await
        {
            Ok(input) => input,
            Err(AppError::Interrupted) => {
                console.info("\nInterrupted by user. Goodbye!");
                break;
            }
            Err(err) => return Err(err),
        };

        match parse_command(&input) {
            DriverCommand::Skip => continue,
            DriverCommand::Quit => {
                console.info("Goodbye! Jira Approval Bot shutting down.");
                break;
            }
            DriverCommand::Help => {
                for line in HELP {
                    console.info(line);
                }
            }
            DriverCommand::Invalid(message) => console.failure(&message),
            DriverCommand::Approve(key) => {
                match ctx.interrupt.guard(approve_ticket(ctx, &key)).await {
                    Ok(outcome) => report(ctx, &key, &outcome),
                    Err(AppError::Interrupted) => {
                        console.info("\nInterrupted by user. Goodbye!");
                        break;
                    }
                    Err(err) => {
                        error!(key = %key, error = %err, "unexpected error while approving");
                        console.failure(&format!("Unexpected error: {err}"));
                    }
                }
            }
        }
    }

    Ok(())
}

fn report(ctx: &AppContext, key: &TicketKey, outcome: &WorkflowOutcome) {
    let message = format!("{key}: {outcome}");
    match outcome {
        WorkflowOutcome::Failed(_) => ctx.console.failure(&message),
        _ => ctx.console.info(&message),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::interrupt::Interrupt;
    use crate::testing::{FakeTracker, ScriptedConsole, context, context_with_interrupt};

    #[test]
    fn recognises_control_words_in_any_case() {
        for word in ["quit", "EXIT", "Q", " q "] {
            assert_eq!(parse_command(word), DriverCommand::Quit);
        }
        assert_eq!(parse_command("Help"), DriverCommand::Help);
        assert_eq!(parse_command("  "), DriverCommand::Skip);
    }

    #[test]
    fn uppercases_ticket_keys() {
        assert_eq!(
            parse_command("proj-123"),
            DriverCommand::Approve(TicketKey::parse("PROJ-123").unwrap())
        );
    }

    #[test]
    fn rejects_malformed_keys() {
        for input in ["AB", "PROJ123", "-", "a-"] {
            assert!(matches!(parse_command(input), DriverCommand::Invalid(_)));
        }
    }

    #[tokio::test]
    async fn malformed_key_never_reaches_tracker() {
        let tracker = Arc::new(FakeTracker::new().with_issue("PROJ-123", "Open"));
        let console = Arc::new(ScriptedConsole::new(&["AB", "noHyphen", "quit"]));
        let ctx = context(tracker.clone(), console.clone());

        run(&ctx).await.unwrap();

        assert_eq!(tracker.lookup_count(), 0);
        assert!(console.saw("Invalid ticket key format"));
        assert_eq!(console.prompts().len(), 3);
        assert!(console.saw("Goodbye!"));
    }

    #[tokio::test]
    async fn processes_tickets_until_quit() {
        let tracker = Arc::new(
            FakeTracker::new()
                .with_issue("PROJ-123", "Open")
                .with_catalog(&["Approved", "Rejected"]),
        );
        let console = Arc::new(ScriptedConsole::new(&["help", "proj-123", "yes", "yes", "exit"]));
        let ctx = context(tracker.clone(), console.clone());

        run(&ctx).await.unwrap();

        assert_eq!(tracker.lookup_count(), 1);
        assert_eq!(tracker.comment_count(), 1);
        assert_eq!(tracker.applied_ids(), vec!["10".to_string()]);
        assert!(console.saw("PROJ-123: approved and moved to 'Approved'"));
        assert!(console.saw("The bot will show ticket details"));
        assert_eq!(console.remaining_answers(), 0);
    }

    #[tokio::test]
    async fn failed_ticket_does_not_stop_the_loop() {
        let tracker = Arc::new(
            FakeTracker::new()
                .with_issue("PROJ-2", "Open")
                .with_catalog(&[]),
        );
        let console = Arc::new(ScriptedConsole::new(&["PROJ-1", "PROJ-2", "y", "q"]));
        let ctx = context(tracker.clone(), console.clone());

        run(&ctx).await.unwrap();

        assert_eq!(tracker.lookup_count(), 2);
        assert!(console.saw("error: PROJ-1: failed: error retrieving ticket PROJ-1"));
        assert!(console.saw("PROJ-2: approved, status unchanged"));
    }

    #[tokio::test]
    async fn failure_is_reported_once() {
        let tracker = Arc::new(FakeTracker::new());
        let console = Arc::new(ScriptedConsole::new(&["PROJ-1", "q"]));
        let ctx = context(tracker, console.clone());

        run(&ctx).await.unwrap();

        let mentions = console
            .transcript()
            .iter()
            .filter(|line| line.contains("error retrieving ticket PROJ-1"))
            .count();
        assert_eq!(mentions, 1);
    }

    #[tokio::test]
    async fn ctrl_c_during_tracker_call_ends_the_loop() {
        let tracker = Arc::new(
            FakeTracker::new()
                .with_issue("PROJ-7", "Open")
                .stalling_lookups(),
        );
        let console = Arc::new(ScriptedConsole::new(&["PROJ-7", "yes", "quit"]));
        let (trigger, interrupt) = Interrupt::channel();
        let ctx = context_with_interrupt(tracker.clone(), console.clone(), interrupt);

        let (result, ()) = tokio::join!(run(&ctx), async {
            while tracker.lookup_count() == 0 {
                tokio::task::yield_now().await;
            }
            trigger.fire();
        });

        result.unwrap();
        assert_eq!(tracker.comment_count(), 0);
        assert!(console.saw("Interrupted by user. Goodbye!"));
        assert_eq!(console.remaining_answers(), 2);
    }

    #[tokio::test]
    async fn ctrl_c_at_the_prompt_ends_the_loop() {
        let tracker = Arc::new(FakeTracker::new());
        let console = Arc::new(ScriptedConsole::new(&["quit"]));
        let (trigger, interrupt) = Interrupt::channel();
        trigger.fire();
        let ctx = context_with_interrupt(tracker, console.clone(), interrupt);

        run(&ctx).await.unwrap();

        assert!(console.saw("Interrupted by user. Goodbye!"));
        assert!(!console.saw("shutting down"));
    }

    #[tokio::test]
    async fn interruption_ends_the_loop_gracefully() {
        let tracker = Arc::new(
            FakeTracker::new()
                .with_issue("PROJ-9", "Open")
                .with_catalog(&["Approved"]),
        );
        let console = Arc::new(ScriptedConsole::new(&["PROJ-9"]));
        let ctx = context(tracker.clone(), console.clone());

        run(&ctx).await.unwrap();

        assert_eq!(tracker.comment_count(), 0);
        assert!(console.saw("Interrupted by user. Goodbye!"));
    }
}
