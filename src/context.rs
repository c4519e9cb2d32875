use std::sync::Arc;

use crate::config::AppConfig;
use crate::interrupt::Interrupt;
use crate::services::{IssueTrackerService, OperatorConsole};

pub struct AppContext {
    pub config: AppConfig,
    pub issue_tracker: Arc<dyn IssueTrackerService>,
    pub console: Arc<dyn OperatorConsole>,
    pub interrupt: Interrupt,
}

impl AppContext {
    pub fn new(
        config: AppConfig,
        issue_tracker: Arc<dyn IssueTrackerService>,
        console: Arc<dyn OperatorConsole>,
        interrupt: Interrupt,
    ) -> Self {
        Self {
            config,
            issue_tracker,
            console,
            interrupt,
        }
    }
}
