use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("failed to connect to Jira: {0}")]
    Connection(String),
    #[error("issue tracker error: {0}")]
    IssueTracker(String),
    #[error("error retrieving ticket {key}: {reason}")]
    LookupFailed { key: String, reason: String },
    #[error("error adding comment: {0}")]
    CommentPostFailed(String),
    #[error("error getting transitions: {0}")]
    TransitionQueryFailed(String),
    #[error("error transitioning ticket: {0}")]
    TransitionApplyFailed(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("interrupted by operator")]
    Interrupted,
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
