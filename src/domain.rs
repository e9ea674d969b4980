// GitLab API Documentation: https://docs.gitlab.com/ee/api/projects.html#hooks
use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::{DateTime, Utc};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use crate::{
    client::{ClientError, Result},
    id::{HookId, ProjectId},
};

/// A webhook registered on a project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Hook {
    #[serde(default, skip_serializing_if = "HookId::is_unset")]
    pub id: HookId,
    #[serde(default, skip_serializing_if = "CompactString::is_empty")]
    pub url: CompactString,
    /// Creation timestamp exactly as reported by the server
    #[serde(rename = "created_at", default, skip_serializing_if = "CompactString::is_empty")]
    pub created_at_raw: CompactString,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<ProjectId>,
    #[serde(flatten)]
    pub events: HookEvents,
}

/// Events a hook is triggered on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct HookEvents {
    #[serde(rename = "push_events")]
    pub push: bool,
    #[serde(rename = "issues_events")]
    pub issues: bool,
    #[serde(rename = "merge_requests_events")]
    pub merge_requests: bool,
    #[serde(rename = "tag_push_events")]
    pub tag_push: bool,
    #[serde(rename = "note_events")]
    pub note: bool,
    #[serde(rename = "job_events")]
    pub job: bool,
    #[serde(rename = "wiki_page_events")]
    pub wiki: bool,
}

/// Body of the add and edit hook requests.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HookRequest {
    pub url: CompactString,
    #[serde(flatten)]
    pub events: HookEvents,
}

/// Snapshot of a repository file at a given ref.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RepoFile {
    #[serde(default, skip_serializing_if = "CompactString::is_empty")]
    pub file_name: CompactString,
    #[serde(default, skip_serializing_if = "CompactString::is_empty")]
    pub file_path: CompactString,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub size: u64,
    #[serde(default, skip_serializing_if = "CompactString::is_empty")]
    pub encoding: CompactString,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_sha256: Option<CompactString>,
    #[serde(rename = "ref", default, skip_serializing_if = "CompactString::is_empty")]
    pub reference: CompactString,
    #[serde(default, skip_serializing_if = "CompactString::is_empty")]
    pub blob_id: CompactString,
    #[serde(default, skip_serializing_if = "CompactString::is_empty")]
    pub commit_id: CompactString,
    #[serde(default, skip_serializing_if = "CompactString::is_empty")]
    pub last_commit_id: CompactString,
}

fn is_zero(n: &u64) -> bool {
    *n == 0
}

impl Hook {
    /// Parsed creation timestamp, if the server sent one in RFC 3339 form.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.created_at_raw)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

impl HookEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_push(mut self, enabled: bool) -> Self {
        self.push = enabled;
        self
    }

    pub fn with_issues(mut self, enabled: bool) -> Self {
        self.issues = enabled;
        self
    }

    pub fn with_merge_requests(mut self, enabled: bool) -> Self {
        self.merge_requests = enabled;
        self
    }

    pub fn with_tag_push(mut self, enabled: bool) -> Self {
        self.tag_push = enabled;
        self
    }

    pub fn with_note(mut self, enabled: bool) -> Self {
        self.note = enabled;
        self
    }

    pub fn with_job(mut self, enabled: bool) -> Self {
        self.job = enabled;
        self
    }

    pub fn with_wiki(mut self, enabled: bool) -> Self {
        self.wiki = enabled;
        self
    }
}

impl HookRequest {
    pub fn new(url: impl Into<CompactString>, events: HookEvents) -> Self {
        Self { url: url.into(), events }
    }
}

impl RepoFile {
    /// File content as bytes, decoded according to `encoding`.
    pub fn decoded_content(&self) -> Result<Vec<u8>> {
        match self.encoding.as_str() {
            "base64" => {
                // long payloads may arrive line-wrapped
                let compact: Vec<u8> = self
                    .content
                    .bytes()
                    .filter(|b| !b.is_ascii_whitespace())
                    .collect();

                STANDARD
                    .decode(compact)
                    .map_err(|e| ClientError::decode(format!("{}: {e}", self.file_path)))
            },
            "text" | "" => Ok(self.content.as_bytes().to_vec()),
            other => Err(ClientError::decode(format!(
                "{}: unsupported encoding '{other}'",
                self.file_path
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_hook_list_decoding() {
        let payload = json!([
            {
                "id": 1,
                "url": "http://example.com/hook",
                "project_id": 3,
                "created_at": "2012-10-12T17:04:47Z",
                "push_events": true,
                "issues_events": false,
                "merge_requests_events": true,
                "tag_push_events": true,
                "note_events": false,
                "job_events": true,
                "wiki_page_events": false
            },
            {
                "id": 2,
                "url": "http://example.com/other",
                "created_at": "not a timestamp"
            }
        ]);

        let hooks: Vec<Hook> = serde_json::from_value(payload).unwrap();

        assert_eq!(hooks.len(), 2);
        assert_eq!(hooks[0].id, HookId::new(1));
        assert_eq!(hooks[0].url, "http://example.com/hook");
        assert_eq!(hooks[0].project_id, Some(ProjectId::new(3)));
        assert_eq!(hooks[0].created_at_raw, "2012-10-12T17:04:47Z");
        assert_eq!(
            hooks[0].events,
            HookEvents::new()
                .with_push(true)
                .with_merge_requests(true)
                .with_tag_push(true)
                .with_job(true)
        );
        assert!(hooks[0].created_at().is_some());

        assert_eq!(hooks[1].id, HookId::new(2));
        assert_eq!(hooks[1].project_id, None);
        assert_eq!(hooks[1].events, HookEvents::default());
        assert!(hooks[1].created_at().is_none());
    }

    #[test]
    fn test_hook_request_round_trip() {
        let events = HookEvents::new()
            .with_push(true)
            .with_issues(true)
            .with_wiki(true);
        let request = HookRequest::new("https://ci.example.com/hook", events);

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["url"], "https://ci.example.com/hook");
        assert_eq!(body["push_events"], true);
        assert_eq!(body["note_events"], false);

        let decoded: HookRequest = serde_json::from_value(body).unwrap();
        assert_eq!(decoded, request);
    }

    #[test]
    fn test_hook_serialization_omits_zero_values() {
        let hook = Hook { url: "http://example.com".into(), ..Default::default() };
        let value = serde_json::to_value(&hook).unwrap();

        assert!(value.get("id").is_none());
        assert!(value.get("created_at").is_none());
        assert!(value.get("project_id").is_none());
        assert_eq!(value["url"], "http://example.com");
        // event flags are always present
        assert_eq!(value["push_events"], false);
    }

    #[test]
    fn test_repo_file_decoding() {
        let file: RepoFile = serde_json::from_value(json!({
            "file_name": "key.rb",
            "file_path": "app/models/key.rb",
            "size": 13,
            "encoding": "base64",
            "content": "SGVsbG8sIHdvcmxkIQ==",
            "content_sha256": "4c294617b60715c1d218e61164a3abd4808a4284cbc30e6728a01ad9aada4481",
            "ref": "master",
            "blob_id": "79f7bbd25901e8334750839545a9bd021f0e4c83",
            "commit_id": "d5a3ff139356ce33e37e73add446f16869741b50",
            "last_commit_id": "570e7b2abdd848b95f2f578043fc23bd6f6fd24d"
        }))
        .unwrap();

        assert_eq!(file.reference, "master");
        assert_eq!(file.size, 13);
        assert_eq!(file.decoded_content().unwrap(), b"Hello, world!");
    }

    #[test]
    fn test_repo_file_content_encodings() {
        let wrapped = RepoFile {
            encoding: "base64".into(),
            content: "SGVsbG8s\nIHdvcmxkIQ==\n".into(),
            ..Default::default()
        };
        assert_eq!(wrapped.decoded_content().unwrap(), b"Hello, world!");

        let text = RepoFile {
            encoding: "text".into(),
            content: "plain".into(),
            ..Default::default()
        };
        assert_eq!(text.decoded_content().unwrap(), b"plain");

        let unknown = RepoFile { encoding: "rot13".into(), ..Default::default() };
        assert!(matches!(unknown.decoded_content(), Err(ClientError::Decode { .. })));

        let broken = RepoFile {
            encoding: "base64".into(),
            content: "***".into(),
            ..Default::default()
        };
        assert!(broken.decoded_content().is_err());
    }
}
