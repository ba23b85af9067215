//! Configuration model and trait implementations.
//!
//! A configuration describes one deployable unit of a project. Its
//! `definition` is polymorphic; see [`crate::models::definition`] for how
//! the variant is resolved.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::{read_json, ProjectsClient};
use crate::error::{DecodeError, Result};
use crate::models::definition::{
    decode, ConfigDefinitionPatch, ConfigDefinitionPrototype, ConfigDefinitionResponse,
    DefinitionKind, Polymorphic,
};
use crate::models::environment::ProjectReference;
use crate::pagination::{Page, PageMeta, PaginationParams};
use crate::traits::{Create, Delete, Get, List, Update};

/// A project configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// The configuration ID.
    pub id: String,

    /// Revision number of the configuration.
    #[serde(default)]
    pub version: Option<u32>,

    /// Whether this is an unapproved draft.
    #[serde(default)]
    pub is_draft: Option<bool>,

    /// Lifecycle state (e.g. "draft", "validated", "deployed").
    #[serde(default)]
    pub state: Option<String>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub modified_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub href: Option<String>,

    /// The owning project.
    #[serde(default)]
    pub project: Option<ProjectReference>,

    /// What the configuration deploys.
    pub definition: ConfigDefinitionResponse,
}

impl ProjectConfig {
    /// Get the configuration name.
    pub fn name(&self) -> &str {
        self.definition.name()
    }

    /// The definition variant of this configuration.
    pub fn kind(&self) -> DefinitionKind {
        self.definition.kind()
    }
}

/// Parameters for creating a configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigPrototype {
    pub definition: ConfigDefinitionPrototype,
}

/// Parameters for updating a configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigPatch {
    pub definition: ConfigDefinitionPatch,
}

/// Query type for configuration lookups: `(project_id, config_id)`.
pub type ConfigId = (String, String);

/// A configuration as it comes off the wire, before its definition is
/// resolved.
#[derive(Debug, Deserialize)]
struct RawConfig {
    id: String,
    #[serde(default)]
    version: Option<u32>,
    #[serde(default)]
    is_draft: Option<bool>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    modified_at: Option<DateTime<Utc>>,
    #[serde(default)]
    href: Option<String>,
    #[serde(default)]
    project: Option<ProjectReference>,
    #[serde(default)]
    definition: Value,
}

impl TryFrom<RawConfig> for ProjectConfig {
    type Error = DecodeError;

    fn try_from(raw: RawConfig) -> std::result::Result<Self, DecodeError> {
        Ok(Self {
            definition: decode(&raw.definition)?,
            id: raw.id,
            version: raw.version,
            is_draft: raw.is_draft,
            state: raw.state,
            created_at: raw.created_at,
            modified_at: raw.modified_at,
            href: raw.href,
            project: raw.project,
        })
    }
}

/// Read a single configuration, surfacing definition failures as
/// [`ProjectsError::Decode`](crate::ProjectsError::Decode).
async fn read_config(response: reqwest::Response) -> Result<ProjectConfig> {
    let raw: RawConfig = read_json(response).await?;
    Ok(ProjectConfig::try_from(raw)?)
}

/// API response wrapper for listing configurations.
#[derive(Debug, Deserialize)]
struct ConfigListResponse {
    #[serde(flatten)]
    meta: PageMeta,
    #[serde(default)]
    configs: Vec<RawConfig>,
}

fn configs_path(project_id: &str) -> String {
    format!("v1/projects/{}/configs", urlencoding::encode(project_id))
}

fn config_path(project_id: &str, id: &str) -> String {
    format!("{}/{}", configs_path(project_id), urlencoding::encode(id))
}

#[async_trait]
impl Get for ProjectConfig {
    type Id = ConfigId;

    #[tracing::instrument(skip(client))]
    async fn get(client: &ProjectsClient, id: ConfigId) -> Result<Self> {
        let (project_id, config_id) = id;
        let response = client
            .get(&config_path(&project_id, &config_id))
            .await
            .map_err(|e| e.or_not_found("config", &config_id))?;
        read_config(response).await
    }
}

#[async_trait]
impl List for ProjectConfig {
    type Query = String; // Project ID

    #[tracing::instrument(skip(client))]
    async fn list_page(
        client: &ProjectsClient,
        project_id: &Self::Query,
        params: &PaginationParams,
    ) -> Result<Page<Self>> {
        let response = client
            .get_with_query(&configs_path(project_id), params)
            .await
            .map_err(|e| e.or_not_found("project", project_id))?;
        let data: ConfigListResponse = read_json(response).await?;
        let configs = data
            .configs
            .into_iter()
            .map(ProjectConfig::try_from)
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(data.meta.into_page(configs))
    }
}

#[async_trait]
impl Create for ProjectConfig {
    type Parent = String; // Project ID
    type Params = ConfigPrototype;

    #[tracing::instrument(skip(client, params), fields(kind = %params.definition.kind()))]
    async fn create(
        client: &ProjectsClient,
        project_id: String,
        params: ConfigPrototype,
    ) -> Result<Self> {
        let response = client
            .post(&configs_path(&project_id), &params)
            .await
            .map_err(|e| e.or_not_found("project", &project_id))?;
        read_config(response).await
    }
}

#[async_trait]
impl Update for ProjectConfig {
    type Id = ConfigId;
    type Params = ConfigPatch;

    #[tracing::instrument(skip(client, params), fields(kind = %params.definition.kind()))]
    async fn update(client: &ProjectsClient, id: ConfigId, params: ConfigPatch) -> Result<Self> {
        let (project_id, config_id) = id;
        let response = client
            .patch(&config_path(&project_id, &config_id), &params)
            .await
            .map_err(|e| e.or_not_found("config", &config_id))?;
        read_config(response).await
    }
}

#[async_trait]
impl Delete for ProjectConfig {
    type Id = ConfigId;

    #[tracing::instrument(skip(client))]
    async fn delete(client: &ProjectsClient, id: ConfigId) -> Result<()> {
        let (project_id, config_id) = id;
        client
            .delete(&config_path(&project_id, &config_id))
            .await
            .map_err(|e| e.or_not_found("config", &config_id))?;
        Ok(())
    }
}

// Convenience functions for working with configurations

/// Fetch all configurations of a project.
///
/// # Example
///
/// ```ignore
/// use cloudprojects::{ProjectsClient, get_configs};
///
/// let client = ProjectsClient::from_env()?;
/// let configs = get_configs(&client, "a1b2c3").await?;
/// ```
pub async fn get_configs(client: &ProjectsClient, project_id: &str) -> Result<Vec<ProjectConfig>> {
    ProjectConfig::list_all(client, &project_id.to_string()).await
}

/// Get a single configuration.
pub async fn get_config(
    client: &ProjectsClient,
    project_id: &str,
    config_id: &str,
) -> Result<ProjectConfig> {
    ProjectConfig::get(client, (project_id.to_string(), config_id.to_string())).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::definition::{DaDefinitionPrototype, DefinitionFamily, StackMember};

    #[test]
    fn test_config_deserialize_resolves_definition() {
        let config: ProjectConfig = serde_json::from_value(serde_json::json!({
            "id": "cfg-1",
            "version": 3,
            "state": "validated",
            "definition": {
                "description": "Landing zone",
                "name": "vpc",
                "locator_id": "1082e7d2-5e2f-0a11-a3bc-f88a8e1931fc.018edf04-e772-4ca2-9785-03e8e03bef72-global"
            }
        }))
        .expect("Failed to deserialize config");

        assert_eq!(config.name(), "vpc");
        assert_eq!(config.kind(), DefinitionKind::DeployableArchitecture);
        assert_eq!(config.version, Some(3));
    }

    #[test]
    fn test_config_stack_definition() {
        let config: ProjectConfig = serde_json::from_value(serde_json::json!({
            "id": "cfg-2",
            "definition": {
                "description": "Full stack",
                "name": "stack",
                "members": [
                    {"name": "network", "config_id": "cfg-3"},
                    {"name": "compute", "config_id": "cfg-4"}
                ]
            }
        }))
        .unwrap();

        assert_eq!(config.kind(), DefinitionKind::Stack);
        match config.definition {
            ConfigDefinitionResponse::Stack(stack) => {
                assert_eq!(
                    stack.members[1],
                    StackMember {
                        name: "compute".to_string(),
                        config_id: "cfg-4".to_string(),
                    }
                );
            }
            other => panic!("Expected stack definition, got {other:?}"),
        }
    }

    #[test]
    fn test_config_with_incomplete_definition_fails() {
        let result: std::result::Result<ProjectConfig, _> = serde_json::from_value(serde_json::json!({
            "id": "cfg-5",
            "definition": {"name": "n", "resource_crns": ["crn:v1:a"]}
        }));

        let message = result.unwrap_err().to_string();
        assert!(message.contains("description"), "unexpected error: {message}");
    }

    #[test]
    fn test_raw_config_reports_typed_decode_error() {
        let raw: RawConfig = serde_json::from_value(serde_json::json!({
            "id": "cfg-6",
            "definition": {"name": "vpc", "locator_id": "loc-1"}
        }))
        .unwrap();

        let err = ProjectConfig::try_from(raw).unwrap_err();
        assert_eq!(
            err,
            DecodeError::MissingField {
                family: DefinitionFamily::Response,
                field: "description",
            }
        );
    }

    #[test]
    fn test_raw_config_without_definition_is_not_an_object() {
        let raw: RawConfig = serde_json::from_value(serde_json::json!({"id": "cfg-7"})).unwrap();

        assert!(matches!(
            ProjectConfig::try_from(raw),
            Err(DecodeError::NotAnObject {
                family: DefinitionFamily::Response
            })
        ));
    }

    #[test]
    fn test_config_prototype_serializes_variant_fields() {
        let prototype = ConfigPrototype {
            definition: DaDefinitionPrototype {
                name: "vpc".to_string(),
                description: None,
                locator_id: "loc-1".to_string(),
                environment_id: Some("env-1".to_string()),
                authorizations: None,
                compliance_profile: None,
                inputs: None,
                settings: None,
            }
            .into(),
        };

        let value = serde_json::to_value(&prototype).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "definition": {"name": "vpc", "locator_id": "loc-1", "environment_id": "env-1"}
            })
        );

        let back: ConfigPrototype = serde_json::from_value(value).unwrap();
        assert_eq!(back, prototype);
    }

    #[test]
    fn test_config_paths() {
        assert_eq!(configs_path("p1"), "v1/projects/p1/configs");
        assert_eq!(config_path("p1", "c1"), "v1/projects/p1/configs/c1");
    }
}
