use std::env;

use secrecy::SecretString;

use crate::domain::comment::DEFAULT_APPROVAL_MESSAGE;

pub const BASE_URL_VAR: &str = "JIRA_BASE_URL";
pub const EMAIL_VAR: &str = "JIRA_EMAIL";
pub const TOKEN_VAR: &str = "JIRA_API_TOKEN";
pub const APPROVAL_MESSAGE_VAR: &str = "JIRA_APPROVAL_MESSAGE";

/// Settings picked up from the environment. Anything missing is asked for at startup.
#[derive(Debug)]
pub struct AppConfig {
    pub jira_base_url: Option<String>,
    pub jira_email: Option<String>,
    pub jira_token: Option<SecretString>,
    pub approval_message: String,
}

impl AppConfig {
    pub fn load() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            jira_base_url: value(BASE_URL_VAR),
            jira_email: value(EMAIL_VAR),
            jira_token: value(TOKEN_VAR).map(SecretString::from),
            approval_message: value(APPROVAL_MESSAGE_VAR)
                .unwrap_or_else(|| DEFAULT_APPROVAL_MESSAGE.to_string()),
        }
    }
}
