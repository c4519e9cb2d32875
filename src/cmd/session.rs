use secrecy::{ExposeSecret, SecretString};
use tracing::info;

use crate::config::AppConfig;
use crate::error::AppResult;
use crate::infra::jira::JiraClient;
use crate::services::OperatorConsole;

pub struct Credentials {
    pub base_url: String,
    pub email: String,
    pub token: SecretString,
}

/// Fills in whatever the environment left unset by asking the operator.
pub async fn resolve_credentials(
    config: &AppConfig,
    console: &dyn OperatorConsole,
) -> AppResult<Credentials> {
    let base_url = match &config.jira_base_url {
        Some(url) => url.clone(),
        None => {
            prompt_required(
                console,
                "Enter your Jira server URL (e.g., https://yourcompany.atlassian.net)",
            )
            .await?
        }
    };
    let email = match &config.jira_email {
        Some(email) => email.clone(),
        None => prompt_required(console, "Enter your Jira username/email").await?,
    };
    let token = match &config.jira_token {
        Some(token) => {
            console.info("Using Jira API token from the environment");
            SecretString::from(token.expose_secret().to_owned())
        }
        None => {
            console
                .read_secret("Enter your Jira password/API token")
                .await?
        }
    };

    Ok(Credentials {
        base_url,
        email,
        token,
    })
}

pub async fn establish_session(
    config: &AppConfig,
    console: &dyn OperatorConsole,
) -> AppResult<JiraClient> {
    console.info("=== Jira Connection Setup ===");
    let credentials = resolve_credentials(config, console).await?;

    let client =
        JiraClient::connect(&credentials.base_url, &credentials.email, &credentials.token).await?;

    info!(base_url = %credentials.base_url, "connected to Jira");
    console.success(&format!(
        "Successfully connected to Jira as {}",
        credentials.email
    ));
    Ok(client)
}

async fn prompt_required(console: &dyn OperatorConsole, prompt: &str) -> AppResult<String> {
    loop {
        let value = console.read_line(prompt).await?;
        if !value.trim().is_empty() {
            return Ok(value.trim().to_string());
        }
        console.info("A value is required.");
    }
}
