//! Core HTTP client for GitLab API

use std::time::Duration;

use chrono::Local;
use compact_str::{format_compact, CompactString};
use reqwest::{header::RETRY_AFTER, Client, Method, Response};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use super::{
    config::ClientConfig,
    error::{ClientError, Result},
    resource::{ResourceUrl, PROJECT_HOOK, PROJECT_HOOKS, REPO_FILE, REPO_FILE_RAW},
};
use crate::{
    domain::{Hook, HookEvents, HookRequest, RepoFile},
    id::{HookId, ProjectId},
};

/// Pure HTTP client for GitLab API
#[derive(Debug, Clone)]
pub struct GitlabApi {
    client: Client,
    config: ClientConfig,
}

/// GitLab API error response formats
#[derive(Debug, Deserialize)]
struct GitlabApiError {
    error: CompactString,
    error_description: Option<CompactString>,
}

#[derive(Debug, Deserialize)]
struct GitlabApiError2 {
    message: serde_json::Value,
}

impl GitlabApi {
    /// Create a new GitLab API client
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.request.timeout)
            .user_agent(config.request.user_agent.as_str())
            .build()
            .map_err(ClientError::Http)?;

        Ok(Self { client, config })
    }

    /// List the hooks of a project
    #[instrument(skip(self), fields(project_id = %project_id))]
    pub async fn project_hooks(&self, project_id: &ProjectId) -> Result<Vec<Hook>> {
        let id = project_id.to_string();
        let url = self.resource_url(PROJECT_HOOKS, &[("id", &id)])?;

        let hooks: Vec<Hook> = self.get_json(&url).await?;
        debug!(hook_count = hooks.len(), "Successfully fetched hooks");
        Ok(hooks)
    }

    /// Get a single project hook
    #[instrument(skip(self), fields(project_id = %project_id, hook_id = %hook_id))]
    pub async fn project_hook(&self, project_id: &ProjectId, hook_id: HookId) -> Result<Hook> {
        let url = self.hook_url(project_id, hook_id)?;
        self.get_json(&url).await
    }

    /// Register a new hook on a project
    #[instrument(skip(self, events), fields(project_id = %project_id))]
    pub async fn add_project_hook(
        &self,
        project_id: &ProjectId,
        hook_url: &str,
        events: HookEvents,
    ) -> Result<()> {
        let id = project_id.to_string();
        let url = self.resource_url(PROJECT_HOOKS, &[("id", &id)])?;

        let body = HookRequest::new(hook_url, events);
        self.exec_raw(Method::POST, &url, Some(&body)).await?;

        debug!("Hook added");
        Ok(())
    }

    /// Replace the URL and events of an existing hook
    #[instrument(skip(self, events), fields(project_id = %project_id, hook_id = %hook_id))]
    pub async fn edit_project_hook(
        &self,
        project_id: &ProjectId,
        hook_id: HookId,
        hook_url: &str,
        events: HookEvents,
    ) -> Result<()> {
        let url = self.hook_url(project_id, hook_id)?;

        let body = HookRequest::new(hook_url, events);
        self.exec_raw(Method::PUT, &url, Some(&body)).await?;

        debug!("Hook updated");
        Ok(())
    }

    /// Remove a hook from a project
    #[instrument(skip(self), fields(project_id = %project_id, hook_id = %hook_id))]
    pub async fn remove_project_hook(&self, project_id: &ProjectId, hook_id: HookId) -> Result<()> {
        let url = self.hook_url(project_id, hook_id)?;
        self.exec_raw::<()>(Method::DELETE, &url, None).await?;

        debug!("Hook removed");
        Ok(())
    }

    /// Get the raw content of a file at the given ref
    #[instrument(skip(self), fields(project_id = %project_id, git_ref = %git_ref))]
    pub async fn repo_file_raw(
        &self,
        project_id: &ProjectId,
        git_ref: &str,
        file_path: &str,
    ) -> Result<Vec<u8>> {
        let url = self.file_url(REPO_FILE_RAW, project_id, git_ref, file_path)?;

        let contents = self.exec_raw::<()>(Method::GET, &url, None).await?;
        debug!(size = contents.len(), "Successfully fetched raw file");
        Ok(contents)
    }

    /// Get a file's metadata and encoded content at the given ref
    #[instrument(skip(self), fields(project_id = %project_id, git_ref = %git_ref))]
    pub async fn repo_file(
        &self,
        project_id: &ProjectId,
        git_ref: &str,
        file_path: &str,
    ) -> Result<RepoFile> {
        let url = self.file_url(REPO_FILE, project_id, git_ref, file_path)?;
        self.get_json(&url).await
    }

    // Private helper methods

    fn resource_url(&self, template: &str, params: &[(&str, &str)]) -> Result<ResourceUrl> {
        ResourceUrl::build(&self.config.base_url, template, params)
    }

    fn hook_url(&self, project_id: &ProjectId, hook_id: HookId) -> Result<ResourceUrl> {
        let id = project_id.to_string();
        let hook_id = hook_id.to_string();
        self.resource_url(PROJECT_HOOK, &[("id", &id), ("hook_id", &hook_id)])
    }

    fn file_url(
        &self,
        template: &str,
        project_id: &ProjectId,
        git_ref: &str,
        file_path: &str,
    ) -> Result<ResourceUrl> {
        let id = project_id.to_string();
        let url = self.resource_url(template, &[("id", &id), ("file_path", file_path)])?;
        Ok(url.with_query("ref", git_ref))
    }

    /// Perform authenticated GET request and deserialize JSON response
    async fn get_json<T>(&self, url: &ResourceUrl) -> Result<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let contents = self.exec_raw::<()>(Method::GET, url, None).await?;
        serde_json::from_slice(&contents).map_err(|e| {
            ClientError::json_parse(url.display(), format!("Failed to parse response from {url}"), e)
        })
    }

    /// Execute an authenticated request and return the raw response body
    async fn exec_raw<B>(&self, method: Method, url: &ResourceUrl, body: Option<&B>) -> Result<Vec<u8>>
    where
        B: Serialize + ?Sized,
    {
        debug!(%method, url = %url, "Sending request");

        let mut request = self
            .client
            .request(method, url.opaque().clone())
            .header("PRIVATE-TOKEN", self.config.private_token.as_str());

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        self.handle_response(response).await
    }

    /// Handle HTTP response, returning the body of successful responses
    async fn handle_response(&self, response: Response) -> Result<Vec<u8>> {
        let url_path = response.url().path().to_string();
        let status = response.status();
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(Duration::from_secs);
        let body = response.bytes().await?.to_vec();

        // Log response if debug is enabled
        if self.config.debug.log_responses {
            self.log_response_to_file(&url_path, &body);
        }

        if status.is_success() {
            Ok(body)
        } else {
            self.handle_error_response(status.as_u16(), retry_after, &String::from_utf8_lossy(&body))
        }
    }

    /// Handle error responses from GitLab API
    fn handle_error_response<T>(
        &self,
        status: u16,
        retry_after: Option<Duration>,
        body: &str,
    ) -> Result<T> {
        match status {
            401 => Err(ClientError::Authentication),
            404 => Err(ClientError::not_found(Self::error_message(body).unwrap_or("Resource".into()))),
            429 => Err(ClientError::rate_limit(retry_after)),
            _ => match Self::error_message(body) {
                Some(message) => Err(ClientError::gitlab_api(format_compact!("HTTP {}: {}", status, message))),
                None => Err(ClientError::gitlab_api(format_compact!("HTTP {}: {}", status, body))),
            },
        }
    }

    /// Extract the message from either GitLab error body format
    fn error_message(body: &str) -> Option<CompactString> {
        if let Ok(api_error) = serde_json::from_str::<GitlabApiError>(body) {
            Some(format_compact!(
                "{} {}",
                api_error.error,
                api_error.error_description.unwrap_or_default()
            ).trim_end().into())
        } else if let Ok(api_error2) = serde_json::from_str::<GitlabApiError2>(body) {
            // validation failures carry a map of field errors instead of a string
            match api_error2.message {
                serde_json::Value::String(message) => Some(message.into()),
                other => Some(other.to_string().into()),
            }
        } else {
            None
        }
    }

    /// Log HTTP response to file for debugging
    fn log_response_to_file(&self, path: &str, body: &[u8]) {
        if let Some(log_dir) = &self.config.debug.log_directory {
            if !log_dir.exists() {
                if let Err(e) = std::fs::create_dir_all(log_dir) {
                    warn!("Failed to create log directory: {}", e);
                    return;
                }
            }

            let filename = format!(
                "{}_{}.json",
                Local::now().format("%Y-%m-%d_%H-%M-%S%.3f"),
                path.replace('/', "_")
            );

            let log_path = log_dir.join(filename);

            if let Err(e) = std::fs::write(&log_path, body) {
                warn!("Failed to write response log to {:?}: {}", log_path, e);
            } else {
                debug!("Response logged to {:?}", log_path);
            }
        }
    }
}
