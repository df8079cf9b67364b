//! Command dispatch.

use std::sync::Arc;

use anyhow::{Context, Result};
use asana_abstractions::ServiceCollection;
use asana_client::{AsanaApiClient, AsanaClientRegistration, AsanaServiceCollectionExt};
use serde_json::Value;

use crate::cli::{Commands, TaskCommands};
use crate::config::AsanaConfig;

pub mod task;

/// Resolves the client through the container, as any host application would.
pub fn build_client(config: &AsanaConfig) -> Result<Arc<AsanaApiClient>> {
    let token = config.access_token.clone().context(
        "No access token configured: pass --access-token or set ASANA_ACCESS_TOKEN",
    )?;

    let mut services = ServiceCollection::new();
    services.add_asana_client_with(
        AsanaClientRegistration::new()
            .access_token(token)
            .http_options(config.http.clone())
            .base_url(config.base_url.clone()),
    )?;

    services
        .build_service_provider()
        .get_required_service::<AsanaApiClient>()
        .context("Failed to build Asana client")
}

/// Runs `command` and returns the response body, if any.
pub async fn execute(client: &AsanaApiClient, command: Commands) -> Result<Option<Value>> {
    match command {
        Commands::Task(TaskCommands::Create(args)) => task::handle_create(client, args).await,
        Commands::Task(TaskCommands::Get { gid, opt_fields }) => {
            task::handle_get(client, &gid, opt_fields).await
        }
        Commands::Task(TaskCommands::Delete { gid }) => task::handle_delete(client, &gid).await,
    }
}
