//! Project model and trait implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::{read_json, ProjectsClient};
use crate::error::Result;
use crate::models::config::{ConfigPrototype, ProjectConfig};
use crate::models::environment::{Environment, EnvironmentPrototype};
use crate::models::resource::ProjectResource;
use crate::pagination::{Page, PageMeta, PaginationParams};
use crate::traits::{Create, Delete, Get, List, Update};

/// A project.
///
/// Projects group the configurations, environments and deployed resources
/// of one infrastructure-as-code solution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// The project ID.
    pub id: String,

    /// Cloud resource name of the project.
    #[serde(default)]
    pub crn: Option<String>,

    /// Canonical URL of the project.
    #[serde(default)]
    pub href: Option<String>,

    /// When the project was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// Lifecycle state (e.g. "ready", "deleting").
    #[serde(default)]
    pub state: Option<String>,

    /// Region the project lives in.
    #[serde(default)]
    pub location: Option<String>,

    /// Name of the resource group.
    #[serde(default)]
    pub resource_group: Option<String>,

    /// ID of the resource group.
    #[serde(default)]
    pub resource_group_id: Option<String>,

    /// Project settings.
    pub definition: ProjectDefinition,
}

/// Project settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDefinition {
    /// The project name.
    pub name: String,

    /// Project description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Destroy deployed resources when the project is deleted.
    #[serde(default)]
    pub destroy_on_delete: bool,

    /// Deploy configurations automatically once they are validated.
    #[serde(default)]
    pub auto_deploy: bool,

    /// Enable drift monitoring.
    #[serde(default)]
    pub monitoring_enabled: bool,
}

impl Project {
    /// Get the project name.
    pub fn name(&self) -> &str {
        &self.definition.name
    }

    /// Get all configurations of this project.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let project = Project::get(&client, "a1b2c3".to_string()).await?;
    /// for config in project.configs(&client).await? {
    ///     println!("{} ({})", config.name(), config.kind());
    /// }
    /// ```
    pub async fn configs(&self, client: &ProjectsClient) -> Result<Vec<ProjectConfig>> {
        ProjectConfig::list_all(client, &self.id).await
    }

    /// Get all environments of this project.
    pub async fn environments(&self, client: &ProjectsClient) -> Result<Vec<Environment>> {
        Environment::list_all(client, &self.id).await
    }

    /// Get all resources deployed by this project.
    pub async fn resources(&self, client: &ProjectsClient) -> Result<Vec<ProjectResource>> {
        ProjectResource::list_all(client, &self.id).await
    }
}

/// Parameters for creating a project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectPrototype {
    /// Project settings.
    pub definition: ProjectDefinition,

    /// Region to create the project in.
    pub location: String,

    /// Resource group to create the project in.
    pub resource_group: String,

    /// Configurations to create with the project.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub configs: Vec<ConfigPrototype>,

    /// Environments to create with the project.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub environments: Vec<EnvironmentPrototype>,
}

/// Parameters for updating a project's settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectPatch {
    /// New project name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// New project description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Destroy deployed resources when the project is deleted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destroy_on_delete: Option<bool>,

    /// Deploy configurations automatically.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_deploy: Option<bool>,

    /// Enable drift monitoring.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitoring_enabled: Option<bool>,
}

/// Request body for a project update.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ProjectPatchBody {
    pub definition: ProjectPatch,
}

/// API response wrapper for listing projects.
#[derive(Debug, Deserialize)]
struct ProjectListResponse {
    #[serde(flatten)]
    meta: PageMeta,
    #[serde(default)]
    projects: Vec<Project>,
}

fn project_path(id: &str) -> String {
    format!("v1/projects/{}", urlencoding::encode(id))
}

#[async_trait]
impl Get for Project {
    type Id = String; // Project ID

    #[tracing::instrument(skip(client))]
    async fn get(client: &ProjectsClient, id: String) -> Result<Self> {
        let response = client
            .get(&project_path(&id))
            .await
            .map_err(|e| e.or_not_found("project", &id))?;
        read_json(response).await
    }
}

#[async_trait]
impl List for Project {
    type Query = ();

    #[tracing::instrument(skip(client))]
    async fn list_page(
        client: &ProjectsClient,
        _query: &Self::Query,
        params: &PaginationParams,
    ) -> Result<Page<Self>> {
        let response = client.get_with_query("v1/projects", params).await?;
        let data: ProjectListResponse = read_json(response).await?;
        tracing::debug!(items = data.projects.len(), "fetched projects page");

        Ok(data.meta.into_page(data.projects))
    }
}

#[async_trait]
impl Create for Project {
    type Parent = ();
    type Params = ProjectPrototype;

    #[tracing::instrument(skip(client, params), fields(name = %params.definition.name))]
    async fn create(client: &ProjectsClient, _parent: (), params: ProjectPrototype) -> Result<Self> {
        let response = client.post("v1/projects", &params).await?;
        read_json(response).await
    }
}

#[async_trait]
impl Update for Project {
    type Id = String; // Project ID
    type Params = ProjectPatch;

    #[tracing::instrument(skip(client))]
    async fn update(client: &ProjectsClient, id: String, params: Self::Params) -> Result<Self> {
        let body = ProjectPatchBody { definition: params };
        let response = client
            .patch(&project_path(&id), &body)
            .await
            .map_err(|e| e.or_not_found("project", &id))?;
        read_json(response).await
    }
}

#[async_trait]
impl Delete for Project {
    type Id = String; // Project ID

    #[tracing::instrument(skip(client))]
    async fn delete(client: &ProjectsClient, id: String) -> Result<()> {
        client
            .delete(&project_path(&id))
            .await
            .map_err(|e| e.or_not_found("project", &id))?;
        Ok(())
    }
}

// Convenience functions for working with projects

/// Fetch every project visible to the caller.
///
/// # Example
///
/// ```ignore
/// use cloudprojects::{ProjectsClient, get_projects};
///
/// let client = ProjectsClient::from_env()?;
/// let projects = get_projects(&client).await?;
/// ```
pub async fn get_projects(client: &ProjectsClient) -> Result<Vec<Project>> {
    Project::list_all(client, &()).await
}
