use anyhow::{Context, Result};
use asana_abstractions::TaskGid;
use asana_client::AsanaApiClient;
use serde_json::Value;
use tracing::info;

use crate::cli::CreateTaskArgs;

/// Handle task create command
pub async fn handle_create(client: &AsanaApiClient, args: CreateTaskArgs) -> Result<Option<Value>> {
    let body = args.into_request_body();
    let created = client
        .client()
        .tasks()
        .post(&body)
        .await
        .context("Failed to create task")?;

    if let Some(gid) = created
        .as_ref()
        .and_then(|value| value.pointer("/data/gid"))
        .and_then(Value::as_str)
    {
        info!(task = gid, "Task created");
    }
    Ok(created)
}

/// Handle task get command
pub async fn handle_get(
    client: &AsanaApiClient,
    gid: &str,
    opt_fields: Vec<String>,
) -> Result<Option<Value>> {
    let gid = parse_gid(gid)?;
    client
        .client()
        .tasks()
        .by_task_gid(&gid)
        .with_opt_fields(opt_fields)
        .get()
        .await
        .with_context(|| format!("Failed to fetch task {gid}"))
}

/// Handle task delete command
pub async fn handle_delete(client: &AsanaApiClient, gid: &str) -> Result<Option<Value>> {
    let gid = parse_gid(gid)?;
    let deleted = client
        .client()
        .tasks()
        .by_task_gid(&gid)
        .delete()
        .await
        .with_context(|| format!("Failed to delete task {gid}"))?;

    info!(task = %gid, "Task deleted");
    Ok(deleted)
}

fn parse_gid(gid: &str) -> Result<TaskGid> {
    TaskGid::new(gid).context("Task gid cannot be empty")
}
