//! Logging setup.
//!
//! Diagnostics go to stderr through `tracing-subscriber`, filtered by
//! `RUST_LOG`. Operator-facing output is written by the console, not here.
//!
//! ```bash
//! RUST_LOG=jira_approver=debug jira-approver
//! ```

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_FILTER: &str = "jira_approver=warn,reqwest=error";

pub fn init_logging() {
    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);
    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
