//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the cloudprojects binary.

mod listing;

use std::num::NonZeroU32;

use clap::{Parser, Subcommand, ValueEnum};

pub use listing::{
    list_entity, render_items, ConfigRow, EnvironmentRow, Listing, Paging, ProjectRow,
    ResourceRow,
};

/// Cloud Projects command-line interface.
#[derive(Parser, Debug)]
#[command(name = "cloudprojects", about = "Cloud Projects API CLI", version)]
pub struct Cli {
    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Log HTTP requests and responses to stderr.
    #[arg(long, short, global = true, default_value = "false")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Get a single entity by ID.
    Get {
        /// The type of entity to get.
        entity: Entity,

        /// The entity ID.
        id: String,

        /// Owning project ID (required for configs and environments).
        #[arg(long)]
        project: Option<String>,
    },

    /// List entities, one page at a time or all at once.
    List {
        /// The type of entity to list.
        entity: Entity,

        /// Owning project ID (required for configs, environments and resources).
        #[arg(long)]
        project: Option<String>,

        /// Number of items per page.
        #[arg(long)]
        limit: Option<NonZeroU32>,

        /// Continuation token printed by a previous page.
        #[arg(long, conflicts_with = "all")]
        token: Option<String>,

        /// Follow continuation tokens until every page is fetched.
        #[arg(long)]
        all: bool,
    },

    /// Delete an entity.
    Delete {
        /// The type of entity to delete.
        entity: Entity,

        /// The entity ID.
        id: String,

        /// Owning project ID (required for configs and environments).
        #[arg(long)]
        project: Option<String>,
    },
}

/// Entity types that can be operated on.
#[derive(ValueEnum, Clone, Debug, PartialEq, Eq)]
pub enum Entity {
    /// A project.
    #[value(alias = "projects")]
    Project,
    /// A project configuration.
    #[value(alias = "configs")]
    Config,
    /// A project environment.
    #[value(alias = "environments")]
    Environment,
    /// A resource deployed by a project.
    #[value(alias = "resources")]
    Resource,
}
