//! GitLab client modules
//!
//! Project hooks and repository files, one endpoint per operation.

pub mod api;
pub mod config;
pub mod error;
pub mod resource;

#[cfg(test)]
mod tests;

// Re-export main types for convenience
pub use api::GitlabApi;
pub use config::{ClientConfig, DebugConfig, RequestConfig};
pub use error::{ClientError, Result};
pub use resource::ResourceUrl;
