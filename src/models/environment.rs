//! Environment model and trait implementations.
//!
//! Environments hold the authorizations, inputs and compliance profile
//! shared by the configurations deployed to them (e.g. "dev", "prod").

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::{read_json, ProjectsClient};
use crate::error::Result;
use crate::models::definition::{ComplianceProfile, ConfigAuth, ConfigValues};
use crate::pagination::{Page, PageMeta, PaginationParams};
use crate::traits::{Create, Delete, Get, List};

/// A project environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Environment {
    /// The environment ID.
    pub id: String,

    /// The owning project.
    #[serde(default)]
    pub project: Option<ProjectReference>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub modified_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub href: Option<String>,

    /// Account the environment deploys into.
    #[serde(default)]
    pub target_account: Option<String>,

    /// Environment settings.
    pub definition: EnvironmentDefinition,
}

/// Environment settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentDefinition {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorizations: Option<ConfigAuth>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inputs: Option<ConfigValues>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compliance_profile: Option<ComplianceProfile>,
}

/// Reference to the project that owns an environment or configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectReference {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crn: Option<String>,
}

/// Parameters for creating an environment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnvironmentPrototype {
    pub definition: EnvironmentDefinition,
}

impl Environment {
    /// Get the environment name.
    pub fn name(&self) -> &str {
        &self.definition.name
    }
}

/// Query type for environment lookups: `(project_id, environment_id)`.
pub type EnvironmentId = (String, String);

/// API response wrapper for listing environments.
#[derive(Debug, Deserialize)]
struct EnvironmentListResponse {
    #[serde(flatten)]
    meta: PageMeta,
    #[serde(default)]
    environments: Vec<Environment>,
}

fn environments_path(project_id: &str) -> String {
    format!("v1/projects/{}/environments", urlencoding::encode(project_id))
}

fn environment_path(project_id: &str, id: &str) -> String {
    format!("{}/{}", environments_path(project_id), urlencoding::encode(id))
}

#[async_trait]
impl Get for Environment {
    type Id = EnvironmentId;

    #[tracing::instrument(skip(client))]
    async fn get(client: &ProjectsClient, id: EnvironmentId) -> Result<Self> {
        let (project_id, environment_id) = id;
        let response = client
            .get(&environment_path(&project_id, &environment_id))
            .await
            .map_err(|e| e.or_not_found("environment", &environment_id))?;
        read_json(response).await
    }
}

#[async_trait]
impl List for Environment {
    type Query = String; // Project ID

    #[tracing::instrument(skip(client))]
    async fn list_page(
        client: &ProjectsClient,
        project_id: &Self::Query,
        params: &PaginationParams,
    ) -> Result<Page<Self>> {
        let response = client
            .get_with_query(&environments_path(project_id), params)
            .await
            .map_err(|e| e.or_not_found("project", project_id))?;
        let data: EnvironmentListResponse = read_json(response).await?;

        Ok(data.meta.into_page(data.environments))
    }
}

#[async_trait]
impl Create for Environment {
    type Parent = String; // Project ID
    type Params = EnvironmentPrototype;

    #[tracing::instrument(skip(client, params))]
    async fn create(
        client: &ProjectsClient,
        project_id: String,
        params: EnvironmentPrototype,
    ) -> Result<Self> {
        let response = client
            .post(&environments_path(&project_id), &params)
            .await
            .map_err(|e| e.or_not_found("project", &project_id))?;
        read_json(response).await
    }
}

#[async_trait]
impl Delete for Environment {
    type Id = EnvironmentId;

    #[tracing::instrument(skip(client))]
    async fn delete(client: &ProjectsClient, id: EnvironmentId) -> Result<()> {
        let (project_id, environment_id) = id;
        client
            .delete(&environment_path(&project_id, &environment_id))
            .await
            .map_err(|e| e.or_not_found("environment", &environment_id))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_deserialize() {
        let environment: Environment = serde_json::from_value(serde_json::json!({
            "id": "env-1",
            "project": {"id": "p1", "href": "https://example.com/v1/projects/p1"},
            "created_at": "2024-02-01T00:00:00Z",
            "definition": {
                "name": "dev",
                "description": "Development",
                "authorizations": {"method": "trusted_profile", "trusted_profile_id": "tp-1"},
                "inputs": {"region": "us-south"}
            }
        }))
        .expect("Failed to deserialize environment");

        assert_eq!(environment.name(), "dev");
        assert_eq!(environment.project.unwrap().id, "p1");
        let auth = environment.definition.authorizations.unwrap();
        assert_eq!(auth.trusted_profile_id.as_deref(), Some("tp-1"));
        assert_eq!(environment.definition.inputs.unwrap()["region"], "us-south");
    }

    #[test]
    fn test_environment_paths() {
        assert_eq!(environments_path("p1"), "v1/projects/p1/environments");
        assert_eq!(environment_path("p1", "e 1"), "v1/projects/p1/environments/e%201");
    }
}
