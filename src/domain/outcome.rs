use std::fmt;

/// Terminal result of one approval run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowOutcome {
    ApprovedAndTransitioned { transition: String },
    ApprovedNoTransition,
    Cancelled,
    Failed(String),
}

impl fmt::Display for WorkflowOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkflowOutcome::ApprovedAndTransitioned { transition } => {
                write!(f, "approved and moved to '{transition}'")
            }
            WorkflowOutcome::ApprovedNoTransition => f.write_str("approved, status unchanged"),
            WorkflowOutcome::Cancelled => f.write_str("cancelled"),
            WorkflowOutcome::Failed(reason) => write!(f, "failed: {reason}"),
        }
    }
}
