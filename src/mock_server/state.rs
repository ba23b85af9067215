//! Mock server state management.
//!
//! Provides the in-memory data store for the mock Cloud Projects API server.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::error::Result;
use crate::{
    decode, ConfigDefinitionResponse, ConfigPatch, ConfigPrototype, Environment,
    EnvironmentPrototype, Project, ProjectConfig, ProjectPatch, ProjectPrototype,
    ProjectReference, ProjectResource,
};

/// Shared state for the mock server.
///
/// Collections are ordered maps so list endpoints page through a stable
/// order. Nested entities are indexed by project ID, then by their own ID.
#[derive(Debug, Default)]
pub struct MockState {
    /// Projects indexed by ID.
    pub projects: BTreeMap<String, Project>,

    /// Configurations indexed by project ID, then configuration ID.
    pub configs: BTreeMap<String, BTreeMap<String, ProjectConfig>>,

    /// Environments indexed by project ID, then environment ID.
    pub environments: BTreeMap<String, BTreeMap<String, Environment>>,

    /// Deployed resources indexed by project ID.
    pub resources: BTreeMap<String, Vec<ProjectResource>>,

    /// Optional authentication token. If set, requests must include this token.
    pub required_token: Option<String>,

    /// Counter used to mint IDs for created entities.
    next_id: u64,
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Add a project to the state.
    pub fn with_project(mut self, project: Project) -> Self {
        self.projects.insert(project.id.clone(), project);
        self
    }

    /// Add a configuration to a project.
    pub fn with_config(mut self, project_id: &str, config: ProjectConfig) -> Self {
        self.insert_config(project_id, config);
        self
    }

    /// Add an environment to a project.
    pub fn with_environment(mut self, project_id: &str, environment: Environment) -> Self {
        self.insert_environment(project_id, environment);
        self
    }

    /// Add deployed resources to a project.
    pub fn with_resources(mut self, project_id: &str, resources: Vec<ProjectResource>) -> Self {
        self.resources
            .entry(project_id.to_string())
            .or_default()
            .extend(resources);
        self
    }

    /// Set the required authentication token.
    pub fn with_required_token(mut self, token: &str) -> Self {
        self.required_token = Some(token.to_string());
        self
    }

    /// Mint a fresh ID with the given prefix.
    pub fn allocate_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}-{:04}", self.next_id)
    }

    pub fn insert_config(&mut self, project_id: &str, config: ProjectConfig) {
        self.configs
            .entry(project_id.to_string())
            .or_default()
            .insert(config.id.clone(), config);
    }

    pub fn insert_environment(&mut self, project_id: &str, environment: Environment) {
        self.environments
            .entry(project_id.to_string())
            .or_default()
            .insert(environment.id.clone(), environment);
    }

    /// Get a project by ID.
    pub fn get_project(&self, id: &str) -> Option<&Project> {
        self.projects.get(id)
    }

    /// Get a configuration of a project.
    pub fn get_config(&self, project_id: &str, id: &str) -> Option<&ProjectConfig> {
        self.configs.get(project_id)?.get(id)
    }

    /// Get an environment of a project.
    pub fn get_environment(&self, project_id: &str, id: &str) -> Option<&Environment> {
        self.environments.get(project_id)?.get(id)
    }

    /// List all projects in ID order.
    pub fn list_projects(&self) -> Vec<&Project> {
        self.projects.values().collect()
    }

    /// List the configurations of a project in ID order.
    pub fn list_configs(&self, project_id: &str) -> Vec<&ProjectConfig> {
        self.configs
            .get(project_id)
            .map(|configs| configs.values().collect())
            .unwrap_or_default()
    }

    /// List the environments of a project in ID order.
    pub fn list_environments(&self, project_id: &str) -> Vec<&Environment> {
        self.environments
            .get(project_id)
            .map(|environments| environments.values().collect())
            .unwrap_or_default()
    }

    /// List the resources deployed by a project.
    pub fn list_resources(&self, project_id: &str) -> Vec<&ProjectResource> {
        self.resources
            .get(project_id)
            .map(|resources| resources.iter().collect())
            .unwrap_or_default()
    }

    /// Create a project, along with the configurations and environments
    /// its prototype carries.
    ///
    /// Nothing is stored if any configuration definition fails to decode.
    pub fn create_project(&mut self, prototype: ProjectPrototype) -> Result<Project> {
        let id = self.allocate_id("proj");

        let mut configs = Vec::with_capacity(prototype.configs.len());
        for config in prototype.configs {
            configs.push(self.build_config(&id, config)?);
        }

        let project = Project {
            id: id.clone(),
            crn: None,
            href: Some(format!("/v1/projects/{id}")),
            created_at: Some(Utc::now()),
            state: Some("ready".to_string()),
            location: Some(prototype.location),
            resource_group: Some(prototype.resource_group),
            resource_group_id: None,
            definition: prototype.definition,
        };
        self.projects.insert(id.clone(), project.clone());

        for config in configs {
            self.insert_config(&id, config);
        }
        for environment in prototype.environments {
            self.create_environment(&id, environment);
        }

        Ok(project)
    }

    /// Create a configuration from a prototype and store it.
    pub fn create_config(
        &mut self,
        project_id: &str,
        prototype: ConfigPrototype,
    ) -> Result<ProjectConfig> {
        let config = self.build_config(project_id, prototype)?;
        self.insert_config(project_id, config.clone());
        Ok(config)
    }

    /// Turn a prototype definition into the stored response form.
    ///
    /// Responses always carry a description, so an omitted one is stored
    /// as empty.
    fn build_config(
        &mut self,
        project_id: &str,
        prototype: ConfigPrototype,
    ) -> Result<ProjectConfig> {
        let mut definition = serde_json::to_value(&prototype.definition)?;
        if let Value::Object(map) = &mut definition {
            map.entry("description")
                .or_insert_with(|| Value::String(String::new()));
        }
        let definition = decode::<ConfigDefinitionResponse>(&definition)?;

        let id = self.allocate_id("cfg");
        Ok(ProjectConfig {
            href: Some(format!("/v1/projects/{project_id}/configs/{id}")),
            id,
            version: Some(1),
            is_draft: Some(true),
            state: Some("draft".to_string()),
            created_at: Some(Utc::now()),
            modified_at: None,
            project: Some(reference(project_id)),
            definition,
        })
    }

    /// Create an environment from a prototype and store it.
    pub fn create_environment(
        &mut self,
        project_id: &str,
        prototype: EnvironmentPrototype,
    ) -> Environment {
        let id = self.allocate_id("env");
        let environment = Environment {
            href: Some(format!("/v1/projects/{project_id}/environments/{id}")),
            id,
            project: Some(reference(project_id)),
            created_at: Some(Utc::now()),
            modified_at: None,
            target_account: None,
            definition: prototype.definition,
        };
        self.insert_environment(project_id, environment.clone());
        environment
    }

    /// Apply a settings patch to a project and return the updated version.
    pub fn update_project(&mut self, id: &str, patch: ProjectPatch) -> Option<&Project> {
        let project = self.projects.get_mut(id)?;
        let definition = &mut project.definition;

        if let Some(name) = patch.name {
            definition.name = name;
        }
        if let Some(description) = patch.description {
            definition.description = Some(description);
        }
        if let Some(destroy_on_delete) = patch.destroy_on_delete {
            definition.destroy_on_delete = destroy_on_delete;
        }
        if let Some(auto_deploy) = patch.auto_deploy {
            definition.auto_deploy = auto_deploy;
        }
        if let Some(monitoring_enabled) = patch.monitoring_enabled {
            definition.monitoring_enabled = monitoring_enabled;
        }

        Some(project)
    }

    /// Merge a definition patch into a configuration.
    ///
    /// The patched fields overwrite the stored definition and the result is
    /// decoded again, so a patch that introduces a conflicting variant field
    /// is rejected with [`ProjectsError::Decode`](crate::ProjectsError::Decode).
    /// Returns `Ok(None)` if the configuration does not exist.
    pub fn update_config(
        &mut self,
        project_id: &str,
        id: &str,
        patch: ConfigPatch,
    ) -> Result<Option<&ProjectConfig>> {
        let Some(config) = self.configs.get_mut(project_id).and_then(|c| c.get_mut(id)) else {
            return Ok(None);
        };

        let mut merged = serde_json::to_value(&config.definition)?;
        let changes = serde_json::to_value(&patch.definition)?;
        if let (Value::Object(target), Value::Object(source)) = (&mut merged, changes) {
            target.extend(source);
        }

        config.definition = decode::<ConfigDefinitionResponse>(&merged)?;
        config.version = Some(config.version.unwrap_or(0) + 1);
        config.is_draft = Some(true);
        config.modified_at = Some(Utc::now());
        Ok(Some(config))
    }

    /// Remove a project together with everything nested under it.
    pub fn delete_project(&mut self, id: &str) -> Option<Project> {
        let project = self.projects.remove(id)?;
        self.configs.remove(id);
        self.environments.remove(id);
        self.resources.remove(id);
        Some(project)
    }

    /// Remove a configuration from a project.
    pub fn delete_config(&mut self, project_id: &str, id: &str) -> Option<ProjectConfig> {
        self.configs.get_mut(project_id)?.remove(id)
    }

    /// Remove an environment from a project.
    pub fn delete_environment(&mut self, project_id: &str, id: &str) -> Option<Environment> {
        self.environments.get_mut(project_id)?.remove(id)
    }
}

fn reference(project_id: &str) -> ProjectReference {
    ProjectReference {
        id: project_id.to_string(),
        href: Some(format!("/v1/projects/{project_id}")),
        crn: None,
    }
}
