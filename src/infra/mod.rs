pub mod jira;
pub mod terminal;
