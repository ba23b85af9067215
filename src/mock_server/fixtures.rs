//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic test data.

use chrono::{TimeZone, Utc};

use crate::{
    ConfigDefinitionResponse, DaDefinitionResponse, Environment, EnvironmentDefinition, Project,
    ProjectConfig, ProjectDefinition, ProjectReference, ProjectResource,
    ResourceDefinitionResponse, StackDefinitionResponse, StackMember,
};

/// Collection of fixture factories for test data.
pub struct Fixtures;

impl Fixtures {
    // =========================================================================
    // Project Fixtures
    // =========================================================================

    /// Create a minimal project with required fields only.
    pub fn minimal_project(id: &str, name: &str) -> Project {
        Project {
            id: id.to_string(),
            crn: None,
            href: None,
            created_at: None,
            state: None,
            location: None,
            resource_group: None,
            resource_group_id: None,
            definition: ProjectDefinition {
                name: name.to_string(),
                ..Default::default()
            },
        }
    }

    /// Create a project as the API returns it once provisioning finished.
    pub fn ready_project(id: &str, name: &str, location: &str) -> Project {
        let mut project = Self::minimal_project(id, name);
        project.crn = Some(format!("crn:v1:bluemix:public:project:{location}:a/acct:{id}::"));
        project.href = Some(format!("/v1/projects/{id}"));
        project.created_at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).single();
        project.state = Some("ready".to_string());
        project.location = Some(location.to_string());
        project.resource_group = Some("Default".to_string());
        project.definition.description = Some(format!("{name} infrastructure"));
        project
    }

    // =========================================================================
    // Configuration Fixtures
    // =========================================================================

    fn config(id: &str, definition: impl Into<ConfigDefinitionResponse>) -> ProjectConfig {
        ProjectConfig {
            id: id.to_string(),
            version: Some(1),
            is_draft: Some(false),
            state: Some("validated".to_string()),
            created_at: None,
            modified_at: None,
            href: None,
            project: None,
            definition: definition.into(),
        }
    }

    /// Create a configuration that deploys a deployable architecture.
    pub fn da_config(id: &str, name: &str, locator_id: &str) -> ProjectConfig {
        Self::config(
            id,
            DaDefinitionResponse {
                description: format!("{name} architecture"),
                name: name.to_string(),
                locator_id: locator_id.to_string(),
                environment_id: None,
                authorizations: None,
                compliance_profile: None,
                inputs: None,
                settings: None,
            },
        )
    }

    /// Create a configuration that tracks existing resources.
    pub fn resource_config(id: &str, name: &str, crns: &[&str]) -> ProjectConfig {
        Self::config(
            id,
            ResourceDefinitionResponse {
                description: format!("{name} resources"),
                name: name.to_string(),
                resource_crns: crns.iter().map(|crn| crn.to_string()).collect(),
                environment_id: None,
                authorizations: None,
            },
        )
    }

    /// Create a stack configuration from `(member name, config ID)` pairs.
    pub fn stack_config(id: &str, name: &str, members: &[(&str, &str)]) -> ProjectConfig {
        Self::config(
            id,
            StackDefinitionResponse {
                description: format!("{name} stack"),
                name: name.to_string(),
                members: members
                    .iter()
                    .map(|(name, config_id)| StackMember {
                        name: name.to_string(),
                        config_id: config_id.to_string(),
                    })
                    .collect(),
                environment_id: None,
                inputs: None,
            },
        )
    }

    // =========================================================================
    // Environment and Resource Fixtures
    // =========================================================================

    /// Create an environment with no inputs.
    pub fn environment(id: &str, name: &str) -> Environment {
        Environment {
            id: id.to_string(),
            project: None,
            created_at: None,
            modified_at: None,
            href: None,
            target_account: None,
            definition: EnvironmentDefinition {
                name: name.to_string(),
                ..Default::default()
            },
        }
    }

    /// Create a deployed resource.
    pub fn resource(crn: &str, name: &str, resource_type: &str) -> ProjectResource {
        ProjectResource {
            resource_crn: crn.to_string(),
            resource_name: Some(name.to_string()),
            resource_type: Some(resource_type.to_string()),
            resource_status: Some("active".to_string()),
            account_id: None,
            location: Some("us-south".to_string()),
            resource_group_id: None,
            tags: vec![],
        }
    }

    /// A reference back to the owning project.
    pub fn project_reference(project_id: &str) -> ProjectReference {
        ProjectReference {
            id: project_id.to_string(),
            href: Some(format!("/v1/projects/{project_id}")),
            crn: None,
        }
    }

    // =========================================================================
    // Scenario Builders
    // =========================================================================

    /// Create a default set of test data for common scenarios.
    pub fn default_scenario() -> DefaultScenario {
        DefaultScenario::new()
    }
}

/// A complete test scenario with related entities.
pub struct DefaultScenario {
    pub projects: Vec<Project>,
    pub configs: Vec<(String, ProjectConfig)>,
    pub environments: Vec<(String, Environment)>,
    pub resources: Vec<(String, Vec<ProjectResource>)>,
}

impl DefaultScenario {
    /// ID of the project that owns the scenario's nested entities.
    pub const PROJECT_ID: &'static str = "proj-landing-zone";

    fn new() -> Self {
        let project_id = Self::PROJECT_ID;
        let network_crn = "crn:v1:bluemix:public:is:us-south:a/acct::vpc:r006-network";
        let bucket_crn = "crn:v1:bluemix:public:cloud-object-storage:global:a/acct::bucket:logs";

        let projects = vec![
            Fixtures::ready_project(project_id, "Landing Zone", "us-south"),
            Fixtures::ready_project("proj-observability", "Observability", "eu-de"),
            Fixtures::ready_project("proj-sandbox", "Sandbox", "us-east"),
        ];

        let owned = |mut config: ProjectConfig| {
            config.project = Some(Fixtures::project_reference(project_id));
            (project_id.to_string(), config)
        };
        let configs = vec![
            owned(Fixtures::da_config(
                "cfg-network",
                "network",
                "1082e7d2-5e2f-0a11-a3bc-f88a8e1931fc.c7ab8b8d-global",
            )),
            owned(Fixtures::resource_config(
                "cfg-existing",
                "existing",
                &[network_crn, bucket_crn],
            )),
            owned(Fixtures::stack_config(
                "cfg-stack",
                "landing-zone",
                &[("network", "cfg-network"), ("existing", "cfg-existing")],
            )),
        ];

        let mut development = Fixtures::environment("env-dev", "development");
        development.project = Some(Fixtures::project_reference(project_id));
        development.definition.description = Some("Shared development account".to_string());
        let environments = vec![(project_id.to_string(), development)];

        let resources = vec![(
            project_id.to_string(),
            vec![
                Fixtures::resource(network_crn, "landing-zone-vpc", "is.vpc"),
                Fixtures::resource(bucket_crn, "logs", "cloud-object-storage"),
            ],
        )];

        Self {
            projects,
            configs,
            environments,
            resources,
        }
    }
}
