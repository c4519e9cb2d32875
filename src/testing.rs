//! Scripted collaborators for workflow and driver tests.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use secrecy::SecretString;

use crate::config::AppConfig;
use crate::context::AppContext;
use crate::domain::ticket::{IssueHandle, IssueRecord, TicketKey};
use crate::domain::transition::Transition;
use crate::error::{AppError, AppResult};
use crate::interrupt::Interrupt;
use crate::services::{IssueTrackerService, OperatorConsole};

pub const ACTOR: &str = "approver@acme.test";

/// Console that replays canned answers and records everything shown.
///
/// Running out of answers behaves like the operator hitting Ctrl-C.
#[derive(Default)]
pub struct ScriptedConsole {
    answers: Mutex<VecDeque<String>>,
    transcript: Mutex<Vec<String>>,
}

impl ScriptedConsole {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: Mutex::new(answers.iter().map(|a| a.to_string()).collect()),
            transcript: Mutex::new(Vec::new()),
        }
    }

    pub fn transcript(&self) -> Vec<String> {
        self.transcript.lock().unwrap().clone()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.transcript()
            .into_iter()
            .filter_map(|line| line.strip_prefix("? ").map(str::to_string))
            .collect()
    }

    pub fn saw(&self, fragment: &str) -> bool {
        self.transcript().iter().any(|line| line.contains(fragment))
    }

    pub fn remaining_answers(&self) -> usize {
        self.answers.lock().unwrap().len()
    }

    fn record(&self, line: String) {
        self.transcript.lock().unwrap().push(line);
    }
}

#[async_trait]
impl OperatorConsole for ScriptedConsole {
    async fn read_line(&self, prompt: &str) -> AppResult<String> {
        self.record(format!("? {prompt}"));
        let answer = self.answers.lock().unwrap().pop_front();
        answer
            .map(|a| a.trim().to_string())
            .ok_or(AppError::Interrupted)
    }

    async fn read_secret(&self, prompt: &str) -> AppResult<SecretString> {
        self.read_line(prompt).await.map(SecretString::from)
    }

    fn info(&self, message: &str) {
        self.record(message.to_string());
    }

    fn success(&self, message: &str) {
        self.record(format!("ok: {message}"));
    }

    fn failure(&self, message: &str) {
        self.record(format!("error: {message}"));
    }
}

/// In-memory tracker that records every mutating call.
///
/// Each `list_transitions` call takes the next scripted catalog; the last one
/// repeats once the script runs out.
#[derive(Default)]
pub struct FakeTracker {
    issues: HashMap<String, IssueRecord>,
    catalogs: Mutex<VecDeque<Vec<Transition>>>,
    stall_lookups: bool,
    fail_comments: bool,
    fail_transition_queries: bool,
    fail_applies: bool,
    pub lookups: Mutex<Vec<String>>,
    pub comments: Mutex<Vec<(String, String)>>,
    pub applied: Mutex<Vec<(String, String)>>,
}

impl FakeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_issue(mut self, key: &str, status: &str) -> Self {
        let record = IssueRecord {
            handle: IssueHandle {
                key: key.to_string(),
                id: format!("1{}", self.issues.len()),
            },
            summary: format!("Review request {key}"),
            status: status.to_string(),
            assignee: Some("Dana Scully".to_string()),
            reporter: None,
            description: None,
        };
        self.issues.insert(key.to_string(), record);
        self
    }

    pub fn with_catalog(self, names: &[&str]) -> Self {
        let transitions = names
            .iter()
            .enumerate()
            .map(|(i, name)| Transition::new(format!("{}", (i + 1) * 10), *name))
            .collect();
        self.catalogs.lock().unwrap().push_back(transitions);
        self
    }

    /// Lookups are recorded and then never complete, like a hung request.
    pub fn stalling_lookups(mut self) -> Self {
        self.stall_lookups = true;
        self
    }

    pub fn failing_comments(mut self) -> Self {
        self.fail_comments = true;
        self
    }

    pub fn failing_transition_queries(mut self) -> Self {
        self.fail_transition_queries = true;
        self
    }

    pub fn failing_applies(mut self) -> Self {
        self.fail_applies = true;
        self
    }

    pub fn lookup_count(&self) -> usize {
        self.lookups.lock().unwrap().len()
    }

    pub fn comment_count(&self) -> usize {
        self.comments.lock().unwrap().len()
    }

    pub fn applied_ids(&self) -> Vec<String> {
        self.applied
            .lock()
            .unwrap()
            .iter()
            .map(|(_, id)| id.clone())
            .collect()
    }
}

#[async_trait]
impl IssueTrackerService for FakeTracker {
    fn identity(&self) -> &str {
        ACTOR
    }

    async fn get_issue(&self, key: &TicketKey) -> AppResult<IssueRecord> {
        self.lookups.lock().unwrap().push(key.to_string());
        if self.stall_lookups {
            std::future::pending::<()>().await;
        }
        self.issues.get(key.as_str()).cloned().ok_or_else(|| {
            AppError::IssueTracker(format!("Jira responded with 404 Not Found: {key}"))
        })
    }

    async fn list_transitions(&self, _issue: &IssueHandle) -> AppResult<Vec<Transition>> {
        if self.fail_transition_queries {
            return Err(AppError::IssueTracker("Jira responded with 503".to_string()));
        }
        let mut catalogs = self.catalogs.lock().unwrap();
        let next = if catalogs.len() > 1 {
            catalogs.pop_front()
        } else {
            catalogs.front().cloned()
        };
        Ok(next.unwrap_or_default())
    }

    async fn add_comment(&self, issue: &IssueHandle, body: &str) -> AppResult<()> {
        if self.fail_comments {
            return Err(AppError::IssueTracker("Jira responded with 403".to_string()));
        }
        self.comments
            .lock()
            .unwrap()
            .push((issue.key.clone(), body.to_string()));
        Ok(())
    }

    async fn apply_transition(&self, issue: &IssueHandle, transition_id: &str) -> AppResult<()> {
        if self.fail_applies {
            return Err(AppError::IssueTracker("Jira responded with 400".to_string()));
        }
        self.applied
            .lock()
            .unwrap()
            .push((issue.key.clone(), transition_id.to_string()));
        Ok(())
    }
}

pub fn context(tracker: Arc<FakeTracker>, console: Arc<ScriptedConsole>) -> AppContext {
    let (_trigger, interrupt) = Interrupt::channel();
    context_with_interrupt(tracker, console, interrupt)
}

pub fn context_with_interrupt(
    tracker: Arc<FakeTracker>,
    console: Arc<ScriptedConsole>,
    interrupt: Interrupt,
) -> AppContext {
    AppContext::new(AppConfig::from_lookup(|_| None), tracker, console, interrupt)
}
