pub mod issue_tracker;
pub mod operator;

pub use issue_tracker::IssueTrackerService;
pub use operator::OperatorConsole;
