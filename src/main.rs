use std::{io::Write, path::PathBuf, process::exit};

use clap::{Args as ClapArgs, Parser, Subcommand};
use glim_gitlab::{
    client::{ClientConfig, GitlabApi},
    config::{default_config_path, load_config},
    domain::HookEvents,
    id::{HookId, ProjectId},
    logging::{init_logging, LoggingConfig},
    result::{GlimError, Result},
};
use serde::Serialize;
use tracing::{error, info};

/// Manage GitLab project hooks and read repository files
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Alternate path to the configuration file.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Print the path to the configuration file and exit.
    #[arg(short, long)]
    print_config_path: bool,
    /// Write every HTTP response body to the debug log directory.
    #[arg(long, env = "GLIM_GITLAB_DEBUG")]
    log_responses: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Project webhooks
    #[command(subcommand)]
    Hooks(HooksCommand),
    /// Repository files
    #[command(subcommand)]
    File(FileCommand),
}

#[derive(Subcommand, Debug)]
enum HooksCommand {
    /// List the hooks of a project
    List { project: ProjectId },
    /// Show a single hook
    Get { project: ProjectId, hook_id: HookId },
    /// Register a new hook
    Add {
        project: ProjectId,
        url: String,
        #[command(flatten)]
        events: EventFlags,
    },
    /// Replace the URL and events of a hook
    Edit {
        project: ProjectId,
        hook_id: HookId,
        url: String,
        #[command(flatten)]
        events: EventFlags,
    },
    /// Delete a hook
    Remove { project: ProjectId, hook_id: HookId },
}

#[derive(Subcommand, Debug)]
enum FileCommand {
    /// Write the raw file content to stdout
    Raw {
        project: ProjectId,
        file_path: String,
        #[arg(short = 'r', long = "ref", default_value = "main")]
        git_ref: String,
    },
    /// Print file metadata and content as JSON
    Show {
        project: ProjectId,
        file_path: String,
        #[arg(short = 'r', long = "ref", default_value = "main")]
        git_ref: String,
    },
}

#[derive(ClapArgs, Debug)]
struct EventFlags {
    #[arg(long)]
    push: bool,
    #[arg(long)]
    issues: bool,
    #[arg(long)]
    merge_requests: bool,
    #[arg(long)]
    tag_push: bool,
    #[arg(long)]
    note: bool,
    #[arg(long)]
    job: bool,
    #[arg(long)]
    wiki: bool,
}

impl From<EventFlags> for HookEvents {
    fn from(flags: EventFlags) -> Self {
        HookEvents::new()
            .with_push(flags.push)
            .with_issues(flags.issues)
            .with_merge_requests(flags.merge_requests)
            .with_tag_push(flags.tag_push)
            .with_note(flags.note)
            .with_job(flags.job)
            .with_wiki(flags.wiki)
    }
}

fn main() -> Result<()> {
    color_eyre::install()
        .map_err(|e| GlimError::GeneralError(format!("failed to install color_eyre: {e}").into()))?;

    let args = Args::parse();
    let config_path = args.config.clone().unwrap_or_else(default_config_path);

    if args.print_config_path {
        println!("{}", config_path.display());
        exit(0);
    }

    let command = require_command(args.command)?;

    let config = load_config(&config_path)?;

    let mut logging_config = LoggingConfig::from_env();
    if let Some(level) = &config.log_level {
        logging_config = logging_config.with_level(level);
    }
    let _log_guard = init_logging(logging_config)?;
    info!(version = env!("CARGO_PKG_VERSION"), "glim-gitlab starting up");

    if let Err(e) = config.validate() {
        return Err(GlimError::ConfigError(
            format!("{e} (in {})", config_path.display()).into(),
        ));
    }

    let client_config = ClientConfig::from(config).with_debug_logging(args.log_responses);
    let api = GitlabApi::new(client_config)?;

    let rt = tokio::runtime::Runtime::new()?;
    let result = rt.block_on(run(&api, command));
    if let Err(e) = &result {
        error!(error = %e, "Command failed");
    }
    result
}

/// Checked before logging is initialised.
fn require_command(command: Option<Command>) -> Result<Command> {
    command.ok_or_else(|| GlimError::GeneralError("no command given, see --help".into()))
}

async fn run(api: &GitlabApi, command: Command) -> Result<()> {
    match command {
        Command::Hooks(HooksCommand::List { project }) => {
            print_json(&api.project_hooks(&project).await?)
        },
        Command::Hooks(HooksCommand::Get { project, hook_id }) => {
            print_json(&api.project_hook(&project, hook_id).await?)
        },
        Command::Hooks(HooksCommand::Add { project, url, events }) => {
            api.add_project_hook(&project, &url, events.into()).await?;
            Ok(())
        },
        Command::Hooks(HooksCommand::Edit { project, hook_id, url, events }) => {
            api.edit_project_hook(&project, hook_id, &url, events.into()).await?;
            Ok(())
        },
        Command::Hooks(HooksCommand::Remove { project, hook_id }) => {
            api.remove_project_hook(&project, hook_id).await?;
            Ok(())
        },
        Command::File(FileCommand::Raw { project, file_path, git_ref }) => {
            let contents = api.repo_file_raw(&project, &git_ref, &file_path).await?;
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&contents)?;
            stdout.flush()?;
            Ok(())
        },
        Command::File(FileCommand::Show { project, file_path, git_ref }) => {
            print_json(&api.repo_file(&project, &git_ref, &file_path).await?)
        },
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
