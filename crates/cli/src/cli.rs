//! Command-line surface.

use std::path::PathBuf;

use asana_abstractions::WorkspaceGid;
use asana_client::{TasksPostRequestBody, TasksPostRequestBodyData};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};

use crate::config::{AsanaConfig, LogFormat};

#[derive(Debug, Parser)]
#[command(name = "asana")]
#[command(about = "Create, fetch and delete Asana tasks", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults to ./asana.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Personal access token
    #[arg(long, global = true, env = "ASANA_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// Log output format
    #[arg(long, global = true, value_enum)]
    pub log_format: Option<LogFormat>,
}

impl Cli {
    /// Applies flags on top of file and environment configuration.
    pub fn apply_overrides(&self, config: &mut AsanaConfig) {
        if let Some(token) = &self.access_token {
            config.access_token = Some(token.clone());
        }
        if let Some(format) = self.log_format {
            config.log_format = format.as_str().to_owned();
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Task commands
    #[command(subcommand)]
    Task(TaskCommands),
}

#[derive(Debug, Subcommand)]
pub enum TaskCommands {
    /// Create a task
    Create(CreateTaskArgs),

    /// Fetch a task
    Get {
        /// Task gid
        gid: String,

        /// Optional fields to include (comma-separated)
        #[arg(long, value_delimiter = ',')]
        opt_fields: Vec<String>,
    },

    /// Delete a task
    Delete {
        /// Task gid
        gid: String,
    },
}

#[derive(Debug, Args)]
pub struct CreateTaskArgs {
    /// Workspace gid
    #[arg(long, value_parser = parse_workspace_gid)]
    pub workspace: WorkspaceGid,

    /// Task name
    #[arg(long)]
    pub name: String,

    /// Plain-text description
    #[arg(long)]
    pub notes: Option<String>,

    /// Rich-text description
    #[arg(long)]
    pub html_notes: Option<String>,

    /// Due date (YYYY-MM-DD)
    #[arg(long, conflicts_with = "due_at")]
    pub due_on: Option<NaiveDate>,

    /// Due date and time (RFC 3339)
    #[arg(long)]
    pub due_at: Option<DateTime<Utc>>,

    /// Start date (YYYY-MM-DD)
    #[arg(long, conflicts_with = "start_at")]
    pub start_on: Option<NaiveDate>,

    /// Start date and time (RFC 3339)
    #[arg(long)]
    pub start_at: Option<DateTime<Utc>>,

    /// Mark the task complete (`--completed` alone means true)
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_name = "BOOL")]
    pub completed: Option<bool>,

    /// Like the task (`--liked` alone means true)
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_name = "BOOL")]
    pub liked: Option<bool>,

    /// Identifier of the task in another system
    #[arg(long)]
    pub external_id: Option<String>,

    /// Project gid (repeatable)
    #[arg(long = "project", value_name = "GID")]
    pub projects: Vec<String>,

    /// Assignee gid, email, or "me"
    #[arg(long)]
    pub assignee: Option<String>,
}

impl CreateTaskArgs {
    /// Builds the `POST /tasks` body.
    pub fn into_request_body(self) -> TasksPostRequestBody {
        let mut data = TasksPostRequestBodyData {
            workspace: Some(self.workspace.as_str().to_owned()),
            assignee: self.assignee,
            projects: (!self.projects.is_empty()).then_some(self.projects),
            ..Default::default()
        }
        .with_name(self.name);

        data.set_notes(self.notes);
        data.set_html_notes(self.html_notes);
        data.set_due_on_date(self.due_on);
        data.set_due_at_time(self.due_at);
        data.set_start_on_date(self.start_on);
        data.set_start_at_time(self.start_at);
        data.set_external_id(self.external_id);
        data.set_completed(self.completed);
        data.set_liked(self.liked);

        TasksPostRequestBody::new(data)
    }
}

fn parse_workspace_gid(value: &str) -> Result<WorkspaceGid, String> {
    WorkspaceGid::new(value).ok_or_else(|| "workspace gid cannot be empty".to_owned())
}
