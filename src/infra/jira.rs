use async_trait::async_trait;
use base64::prelude::{BASE64_STANDARD, Engine as _};
use reqwest::{
    Client, Response, Url,
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::debug;

use crate::domain::ticket::{IssueHandle, IssueRecord, TicketKey};
use crate::domain::transition::Transition;
use crate::error::{AppError, AppResult};
use crate::services::IssueTrackerService;

const ISSUE_FIELDS: &str = "summary,status,assignee,reporter,description";

pub struct JiraClient {
    http: Client,
    base_url: Url,
    identity: String,
    auth: SecretString,
}

impl JiraClient {
    fn new(base_url: Url, identity: &str, secret: &SecretString) -> Self {
        Self {
            http: Client::new(),
            base_url,
            identity: identity.to_string(),
            auth: SecretString::from(Self::auth_header(identity, secret.expose_secret())),
        }
    }

    /// Builds a session and checks the credentials against `/myself`.
    pub async fn connect(base_url: &str, identity: &str, secret: &SecretString) -> AppResult<Self> {
        let client = Self::new(Self::normalize_base_url(base_url)?, identity, secret);

        let response = client
            .http
            .get(client.endpoint(&["myself"])?)
            .header(AUTHORIZATION, client.auth.expose_secret())
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|err| AppError::Connection(format!("failed to call Jira: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Connection(format!(
                "Jira rejected the credentials for {identity} ({status})"
            )));
        }

        debug!(base_url = %client.base_url, identity, "authenticated against Jira");
        Ok(client)
    }

    fn normalize_base_url(base_url: &str) -> AppResult<Url> {
        let trimmed = base_url.trim();
        let parsed = Url::parse(trimmed).map_err(|err| {
            AppError::Configuration(format!("invalid Jira base URL '{trimmed}': {err}"))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.cannot_be_a_base() {
            return Err(AppError::Configuration(format!(
                "Jira base URL must be an http or https address, got '{trimmed}'"
            )));
        }
        Ok(parsed)
    }

    fn auth_header(email: &str, token: &str) -> String {
        let credentials = format!("{email}:{token}");
        let encoded = BASE64_STANDARD.encode(credentials);
        format!("Basic {encoded}")
    }

    /// REST v2 URL under the base. Each segment is percent-encoded on its own,
    /// so a `/` or `..` inside a ticket key stays inside that segment.
    fn endpoint(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                AppError::Configuration(format!("invalid Jira base URL '{}'", self.base_url))
            })?
            .pop_if_empty()
            .extend(["rest", "api", "2"])
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> AppResult<T> {
        debug!(path = url.path(), "GET");
        let response = self
            .http
            .get(url)
            .header(AUTHORIZATION, self.auth.expose_secret())
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|err| AppError::IssueTracker(format!("failed to call Jira: {err}")))?;

        let body = Self::success_body(response).await?;
        serde_json::from_str(&body)
            .map_err(|err| AppError::IssueTracker(format!("failed to parse Jira response: {err}")))
    }

    async fn post_json<B: Serialize + Sync>(&self, url: Url, body: &B) -> AppResult<()> {
        debug!(path = url.path(), "POST");
        let response = self
            .http
            .post(url)
            .header(AUTHORIZATION, self.auth.expose_secret())
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await
            .map_err(|err| AppError::IssueTracker(format!("failed to call Jira: {err}")))?;

        Self::success_body(response).await.map(|_| ())
    }

    async fn success_body(response: Response) -> AppResult<String> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            return Err(AppError::IssueTracker(format!(
                "Jira responded with {status}: {body}"
            )));
        }
        response
            .text()
            .await
            .map_err(|err| AppError::IssueTracker(format!("failed to read Jira response: {err}")))
    }
}

#[async_trait]
impl IssueTrackerService for JiraClient {
    fn identity(&self) -> &str {
        &self.identity
    }

    async fn get_issue(&self, key: &TicketKey) -> AppResult<IssueRecord> {
        let mut url = self.endpoint(&["issue", key.as_str()])?;
        url.query_pairs_mut().append_pair("fields", ISSUE_FIELDS);
        let payload: JiraIssueResponse = self.get_json(url).await?;
        Ok(payload.into_record())
    }

    async fn list_transitions(&self, issue: &IssueHandle) -> AppResult<Vec<Transition>> {
        let url = self.endpoint(&["issue", &issue.key, "transitions"])?;
        let payload: JiraTransitionsResponse = self.get_json(url).await?;
        Ok(payload.into_transitions())
    }

    async fn add_comment(&self, issue: &IssueHandle, body: &str) -> AppResult<()> {
        let url = self.endpoint(&["issue", &issue.key, "comment"])?;
        self.post_json(
            url,
            &JiraCommentRequest {
                body: body.to_string(),
            },
        )
        .await
    }

    async fn apply_transition(&self, issue: &IssueHandle, transition_id: &str) -> AppResult<()> {
        let url = self.endpoint(&["issue", &issue.key, "transitions"])?;
        self.post_json(
            url,
            &JiraTransitionRequest {
                transition: JiraTransitionId {
                    id: transition_id.to_string(),
                },
            },
        )
        .await
    }
}

#[derive(Deserialize)]
struct JiraIssueResponse {
    id: String,
    key: String,
    fields: JiraIssueFields,
}

impl JiraIssueResponse {
    fn into_record(self) -> IssueRecord {
        let fields = self.fields;
        IssueRecord {
            handle: IssueHandle {
                key: self.key,
                id: self.id,
            },
            summary: fields.summary.unwrap_or_default(),
            status: fields.status.map(|s| s.name).unwrap_or_default(),
            assignee: fields.assignee.and_then(|u| u.display_name),
            reporter: fields.reporter.and_then(|u| u.display_name),
            description: fields.description,
        }
    }
}

#[derive(Deserialize)]
struct JiraIssueFields {
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    status: Option<JiraStatus>,
    #[serde(default)]
    assignee: Option<JiraUser>,
    #[serde(default)]
    reporter: Option<JiraUser>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Deserialize)]
struct JiraStatus {
    name: String,
}

#[derive(Deserialize)]
struct JiraUser {
    #[serde(rename = "displayName", default)]
    display_name: Option<String>,
}

#[derive(Deserialize)]
struct JiraTransitionsResponse {
    #[serde(default)]
    transitions: Vec<JiraTransition>,
}

impl JiraTransitionsResponse {
    fn into_transitions(self) -> Vec<Transition> {
        self.transitions
            .into_iter()
            .map(|t| Transition::new(t.id, t.name))
            .collect()
    }
}

#[derive(Deserialize)]
struct JiraTransition {
    id: String,
    name: String,
}

#[derive(Serialize)]
struct JiraCommentRequest {
    body: String,
}

#[derive(Serialize)]
struct JiraTransitionRequest {
    transition: JiraTransitionId,
}

#[derive(Serialize)]
struct JiraTransitionId {
    id: String,
}
