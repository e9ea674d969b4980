//! Test utilities and common test fixtures for client modules

use serde_json::json;

use crate::{
    domain::{Hook, HookEvents},
    id::{HookId, ProjectId},
};


/// Create a sample Hook for testing
pub fn sample_hook() -> Hook {
    Hook {
        id: HookId::new(1),
        url: "http://example.com/hook".into(),
        created_at_raw: "2012-10-12T17:04:47Z".into(),
        project_id: Some(ProjectId::new(123)),
        events: HookEvents::new()
            .with_push(true)
            .with_merge_requests(true)
            .with_job(true),
    }
}

/// Create JSON representation of a hook
pub fn sample_hook_json() -> serde_json::Value {
    json!({
        "id": 1,
        "url": "http://example.com/hook",
        "project_id": 123,
        "push_events": true,
        "issues_events": false,
        "merge_requests_events": true,
        "tag_push_events": false,
        "note_events": false,
        "job_events": true,
        "wiki_page_events": false,
        "enable_ssl_verification": true,
        "created_at": "2012-10-12T17:04:47Z"
    })
}

/// Create JSON representation of a hook list
pub fn hooks_json_response() -> serde_json::Value {
    json!([sample_hook_json()])
}

/// Create JSON representation of a repository file
pub fn sample_repo_file_json() -> serde_json::Value {
    json!({
        "file_name": "README.md",
        "file_path": "docs/README.md",
        "size": 13,
        "encoding": "base64",
        "content": "SGVsbG8sIHdvcmxkIQ==",
        "content_sha256": "315f5bdb76d078c43b8ac0064e4a0164612b1fce77c869345bfc94c75894edd3",
        "ref": "main",
        "blob_id": "79f7bbd25901e8334750839545a9bd021f0e4c83",
        "commit_id": "d5a3ff139356ce33e37e73add446f16869741b50",
        "last_commit_id": "570e7b2abdd848b95f2f578043fc23bd6f6fd24d"
    })
}

/// Create GitLab API error response
pub fn gitlab_error_response(error: &str, description: Option<&str>) -> serde_json::Value {
    let mut json = json!({
        "error": error
    });

    if let Some(desc) = description {
        json["error_description"] = json!(desc);
    }

    json
}

/// Create GitLab API error response (format 2)
pub fn gitlab_error_response_2(message: &str) -> serde_json::Value {
    json!({
        "message": message
    })
}

/// Mock HTTP server for testing
pub struct MockServer {
    pub server: wiremock::MockServer,
}

impl MockServer {
    /// Start a new mock server
    pub async fn start() -> Self {
        let server = wiremock::MockServer::start().await;
        Self { server }
    }

    /// Get the base URL of the mock server
    pub fn base_url(&self) -> String {
        format!("{}/api/v4", self.server.uri())
    }

    /// Create a test config pointing to this mock server
    pub fn test_config(&self) -> crate::client::config::ClientConfig {
        crate::client::config::ClientConfig::new(self.base_url(), "test-token")
    }
}

#[cfg(test)]
#[allow(clippy::module_inception)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_hook_matches_json() {
        let decoded: Hook = serde_json::from_value(sample_hook_json()).unwrap();
        assert_eq!(decoded, sample_hook());
    }

    #[test]
    fn test_error_responses() {
        let error1 = gitlab_error_response("invalid_token", Some("Token is invalid"));
        assert_eq!(error1["error"], "invalid_token");
        assert_eq!(error1["error_description"], "Token is invalid");

        let error2 = gitlab_error_response_2("404 Project Not Found");
        assert_eq!(error2["message"], "404 Project Not Found");
    }
}
