//! Resource URL templating
//!
//! Endpoint paths are written as templates with colon-prefixed placeholders,
//! e.g. `/projects/:id/hooks/:hook_id`. Expanding a template yields two forms
//! of the same URL: a display form carrying the raw parameter values, and the
//! opaque form that is actually requested, where every parameter value is
//! percent-encoded into a single path segment.

use std::fmt;

use url::Url;

use super::error::{ClientError, Result};

pub const PROJECT_HOOKS: &str = "/projects/:id/hooks";
pub const PROJECT_HOOK: &str = "/projects/:id/hooks/:hook_id";
pub const REPO_FILE: &str = "/projects/:id/repository/files/:file_path";
pub const REPO_FILE_RAW: &str = "/projects/:id/repository/files/:file_path/raw";

/// An expanded resource URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceUrl {
    display: String,
    opaque: Url,
    has_query: bool,
}

impl ResourceUrl {
    /// Expand `template` below `base_url`, substituting each `:name`
    /// segment with its value from `params`.
    pub fn build(base_url: &str, template: &str, params: &[(&str, &str)]) -> Result<Self> {
        let mut opaque = Url::parse(base_url).map_err(|_| ClientError::invalid_url(base_url))?;
        let mut display = base_url.trim_end_matches('/').to_string();

        {
            let mut segments = opaque
                .path_segments_mut()
                .map_err(|_| ClientError::invalid_url(base_url))?;
            segments.pop_if_empty();

            for segment in template.split('/').filter(|s| !s.is_empty()) {
                let value = match segment.strip_prefix(':') {
                    Some(name) => params
                        .iter()
                        .find(|(key, _)| *key == name)
                        .map(|(_, value)| *value)
                        .ok_or_else(|| ClientError::missing_parameter(name, template))?,
                    None => segment,
                };

                // the url crate drops or collapses these segments
                if matches!(value, "" | "." | "..") {
                    return Err(ClientError::invalid_parameter(
                        segment.trim_start_matches(':'),
                        value,
                    ));
                }

                display.push('/');
                display.push_str(value);
                segments.push(value);
            }
        }

        Ok(Self { display, opaque, has_query: false })
    }

    /// Append a query parameter to both forms.
    pub fn with_query(mut self, key: &str, value: &str) -> Self {
        self.display.push(if self.has_query { '&' } else { '?' });
        self.has_query = true;
        self.display.push_str(key);
        self.display.push('=');
        self.display.push_str(value);

        self.opaque.query_pairs_mut().append_pair(key, value);
        self
    }

    /// Human-readable URL with unescaped parameter values
    pub fn display(&self) -> &str {
        &self.display
    }

    /// The URL to request
    pub fn opaque(&self) -> &Url {
        &self.opaque
    }
}

impl fmt::Display for ResourceUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}
