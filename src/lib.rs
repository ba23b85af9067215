//! Cloud Projects API client library.
//!
//! A Rust library for the Cloud Projects infrastructure-as-code API using a
//! trait-based architecture where each operation (Get, List, Create,
//! Update, Delete) is defined as a trait that entity types implement.
//!
//! # Quick Start
//!
//! ```no_run
//! use cloudprojects::{ProjectsClient, Project, ProjectConfig, Get, List};
//!
//! #[tokio::main]
//! async fn main() -> cloudprojects::Result<()> {
//!     // Create client from environment variables
//!     let client = ProjectsClient::from_env()?;
//!
//!     // Walk every project, one page at a time
//!     let mut pager = Project::pager(&client, (), std::num::NonZeroU32::new(20));
//!     while pager.has_next() {
//!         for project in pager.get_next().await? {
//!             println!("{} ({})", project.name(), project.id);
//!         }
//!     }
//!
//!     // Configurations decode into their definition variant
//!     let configs = ProjectConfig::list_all(&client, &"a1b2c3".to_string()).await?;
//!     for config in &configs {
//!         println!("{}: {}", config.name(), config.kind());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`Pager`] walks cursor-paginated list endpoints. The cursor is the
//!   `token` query parameter of each page's `next` link.
//! - [`Polymorphic`] resolves configuration definitions, which carry no type
//!   tag, to one of the stack, resource or deployable-architecture variants.
//! - [`Get`], [`List`], [`Create`], [`Update`] and [`Delete`] are implemented
//!   by each entity type for the endpoints it supports.
//!
//! # Configuration
//!
//! The client reads configuration from environment variables:
//!
//! - `PROJECTS_AUTH_TOKEN` (required) - Bearer token
//! - `PROJECTS_API_URL` (optional) - Base URL (defaults to `https://projects.api.cloud.ibm.com`)
//! - `PROJECTS_TIMEOUT_SECS` (optional) - Request timeout in seconds

pub mod cli;
mod client;
mod config;
mod error;
#[cfg(feature = "test-server")]
pub mod mock_server;
mod models;
mod output;
mod pagination;
mod traits;

// Re-export core types
pub use client::ProjectsClient;
pub use config::{ClientConfig, DEFAULT_API_URL};
pub use error::{DecodeError, ProjectsError, Result};
pub use pagination::{
    token_from_href, ListCall, Page, PageLink, Pager, PagerState, PaginationParams, TOKEN_PARAM,
};

// Re-export traits
pub use traits::{Create, Delete, Get, List, Lister, Update};

// Re-export models
pub use models::{
    // Project types
    Project,
    ProjectDefinition,
    ProjectPatch,
    ProjectPrototype,
    // Configuration types
    ConfigId,
    ConfigPatch,
    ConfigPrototype,
    ProjectConfig,
    // Definition variants
    ComplianceProfile,
    ConfigAuth,
    ConfigDefinitionPatch,
    ConfigDefinitionPrototype,
    ConfigDefinitionResponse,
    ConfigValues,
    DaDefinitionPatch,
    DaDefinitionPrototype,
    DaDefinitionResponse,
    DefinitionFamily,
    DefinitionKind,
    Polymorphic,
    ResourceDefinitionPatch,
    ResourceDefinitionPrototype,
    ResourceDefinitionResponse,
    StackDefinitionPatch,
    StackDefinitionPrototype,
    StackDefinitionResponse,
    StackMember,
    // Environment types
    Environment,
    EnvironmentDefinition,
    EnvironmentId,
    EnvironmentPrototype,
    ProjectReference,
    // Resource types
    ProjectResource,
};

// Definition decoding entry point
pub use models::definition::decode;

// Re-export convenience functions
pub use models::{get_config, get_configs, get_projects};

// Re-export output formatting
pub use output::PrettyPrint;
