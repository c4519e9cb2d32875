mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod infra;
mod interrupt;
mod logging;
mod services;
#[cfg(test)]
mod testing;
mod workflow;

use std::sync::Arc;

use clap::Parser;

use crate::cmd::approve;
use crate::cmd::session::establish_session;
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::error::{AppError, AppResult};
use crate::infra::terminal::TerminalConsole;
use crate::interrupt::Interrupt;
use crate::services::OperatorConsole;

/// Review Jira tickets one at a time, post an approval comment and move them
/// along their workflow.
///
/// Connection settings come from JIRA_BASE_URL, JIRA_EMAIL and JIRA_API_TOKEN;
/// anything unset is asked for at startup.
#[derive(Parser)]
#[command(name = "jira-approver", author, version)]
struct Cli {}

#[tokio::main]
async fn main() {
    let _cli = Cli::parse();
    logging::init_logging();

    // Exit explicitly: the stdin reader may still be parked in a blocking read
    // that would otherwise hold up runtime shutdown.
    match run().await {
        Ok(()) => std::process::exit(0),
        Err(AppError::Interrupted) => {
            println!("\nInterrupted by user. Goodbye!");
            std::process::exit(0);
        }
        Err(error) => {
            eprintln!("Error: {error}");
            std::process::exit(1);
        }
    }
}

async fn run() -> AppResult<()> {
    let config = AppConfig::load();
    let console = Arc::new(TerminalConsole::new());

    console.info("Jira Ticket Approval Bot");
    console.info(&"=".repeat(40));

    let interrupt = Interrupt::listen_for_ctrl_c();
    let session = interrupt
        .guard(establish_session(&config, console.as_ref()))
        .await?;
    let context = AppContext::new(config, Arc::new(session), console, interrupt);

    approve::run(&context).await
}
