//! Client for the GitLab project hooks and repository files APIs.
//!
//! ```no_run
//! # async fn run() -> glim_gitlab::client::Result<()> {
//! use glim_gitlab::{client::{ClientConfig, GitlabApi}, domain::HookEvents, id::ProjectId};
//!
//! let api = GitlabApi::new(ClientConfig::new("https://gitlab.example.com/api/v4", "glpat-..."))?;
//! let project = ProjectId::path("group/project");
//!
//! api.add_project_hook(&project, "https://ci.example.com/hook", HookEvents::new().with_push(true))
//!     .await?;
//! for hook in api.project_hooks(&project).await? {
//!     println!("{} {}", hook.id, hook.url);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod domain;
pub mod id;
pub mod logging;
pub mod result;
