//! Cloud Projects CLI binary.
//!
//! A command-line interface for interacting with the Cloud Projects API.

use std::process::ExitCode;

use clap::Parser;
use cloudprojects::cli::{
    list_entity, Cli, Command, ConfigRow, Entity, EnvironmentRow, Paging, ProjectRow, ResourceRow,
};
use cloudprojects::{
    Delete, Environment, Get, PrettyPrint, Project, ProjectConfig, ProjectResource,
    ProjectsClient, ProjectsError,
};
use serde::Serialize;
use tracing::Level;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    let client = match ProjectsClient::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Hint: Set PROJECTS_AUTH_TOKEN environment variable");
            return ExitCode::FAILURE;
        }
    };

    match run(&client, cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(client: &ProjectsClient, cli: Cli) -> cloudprojects::Result<()> {
    match cli.command {
        Command::Get {
            entity,
            id,
            project,
        } => handle_get(client, entity, id, project, cli.json).await,
        Command::List {
            entity,
            project,
            limit,
            token,
            all,
        } => {
            let paging = Paging { limit, token, all };
            handle_list(client, entity, project, paging, cli.json).await
        }
        Command::Delete {
            entity,
            id,
            project,
        } => handle_delete(client, entity, id, project).await,
    }
}

fn require_project(entity: &Entity, project: Option<String>) -> cloudprojects::Result<String> {
    project.ok_or_else(|| {
        ProjectsError::InvalidArgument(format!("--project is required for {entity:?} commands"))
    })
}

async fn handle_get(
    client: &ProjectsClient,
    entity: Entity,
    id: String,
    project: Option<String>,
    json: bool,
) -> cloudprojects::Result<()> {
    match entity {
        Entity::Project => {
            let project = Project::get(client, id).await?;
            output_single(&project, json)?;
        }
        Entity::Config => {
            let project_id = require_project(&entity, project)?;
            let config = ProjectConfig::get(client, (project_id, id)).await?;
            output_single(&config, json)?;
        }
        Entity::Environment => {
            let project_id = require_project(&entity, project)?;
            let environment = Environment::get(client, (project_id, id)).await?;
            output_single(&environment, json)?;
        }
        Entity::Resource => {
            eprintln!("Hint: Use 'cloudprojects list resources --project <id>'");
            return Err(ProjectsError::InvalidArgument(
                "resources can only be listed, not retrieved individually".to_string(),
            ));
        }
    }
    Ok(())
}

async fn handle_list(
    client: &ProjectsClient,
    entity: Entity,
    project: Option<String>,
    paging: Paging,
    json: bool,
) -> cloudprojects::Result<()> {
    let listing = match entity {
        Entity::Project => {
            list_entity::<Project, _, _>(client, (), paging, json, |p| ProjectRow::from(p)).await?
        }
        Entity::Config => {
            let project_id = require_project(&entity, project)?;
            list_entity::<ProjectConfig, _, _>(client, project_id, paging, json, |c| {
                ConfigRow::from(c)
            })
            .await?
        }
        Entity::Environment => {
            let project_id = require_project(&entity, project)?;
            list_entity::<Environment, _, _>(client, project_id, paging, json, |e| {
                EnvironmentRow::from(e)
            })
            .await?
        }
        Entity::Resource => {
            let project_id = require_project(&entity, project)?;
            list_entity::<ProjectResource, _, _>(client, project_id, paging, json, |r| {
                ResourceRow::from(r)
            })
            .await?
        }
    };

    println!("{}", listing.body);
    // Keep stdout parseable in JSON mode
    if let Some(token) = listing.next_token {
        eprintln!("More results available: --token {token}");
    }
    Ok(())
}

async fn handle_delete(
    client: &ProjectsClient,
    entity: Entity,
    id: String,
    project: Option<String>,
) -> cloudprojects::Result<()> {
    match entity {
        Entity::Project => Project::delete(client, id.clone()).await?,
        Entity::Config => {
            let project_id = require_project(&entity, project)?;
            ProjectConfig::delete(client, (project_id, id.clone())).await?;
        }
        Entity::Environment => {
            let project_id = require_project(&entity, project)?;
            Environment::delete(client, (project_id, id.clone())).await?;
        }
        Entity::Resource => {
            return Err(ProjectsError::InvalidArgument(
                "resources are removed by undeploying their configuration".to_string(),
            ));
        }
    }
    eprintln!("Deleted {entity:?} {id}");
    Ok(())
}

fn output_single<T: Serialize + PrettyPrint>(item: &T, json: bool) -> cloudprojects::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(item)?);
    } else {
        println!("{}", item.pretty_print());
    }
    Ok(())
}
