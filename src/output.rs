//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use crate::models::{ConfigDefinitionResponse, Environment, Project, ProjectConfig};

/// Trait for human-readable key-value output.
///
/// Implemented by entity types to provide formatted output
/// suitable for terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

impl PrettyPrint for Project {
    fn pretty_print(&self) -> String {
        let header = format!("Project: {}", self.id);
        let divider = "─".repeat(header.len().max(30));

        let mut lines = vec![header, divider, format!("Name:           {}", self.name())];

        if let Some(ref description) = self.definition.description {
            lines.push(format!("Description:    {}", description));
        }

        if let Some(ref state) = self.state {
            lines.push(format!("State:          {}", state));
        }

        if let Some(ref location) = self.location {
            lines.push(format!("Location:       {}", location));
        }

        if let Some(ref created) = self.created_at {
            lines.push(format!("Created:        {}", created.format(TIMESTAMP_FORMAT)));
        }

        if self.definition.auto_deploy {
            lines.push("Auto deploy:    enabled".to_string());
        }

        lines.join("\n")
    }
}

impl PrettyPrint for ProjectConfig {
    fn pretty_print(&self) -> String {
        let header = format!("Config: {}", self.id);
        let divider = "─".repeat(header.len().max(30));

        let mut lines = vec![
            header,
            divider,
            format!("Name:           {}", self.name()),
            format!("Kind:           {}", self.kind()),
        ];

        if let Some(ref state) = self.state {
            lines.push(format!("State:          {}", state));
        }

        if let Some(version) = self.version {
            lines.push(format!("Version:        {}", version));
        }

        match &self.definition {
            ConfigDefinitionResponse::DeployableArchitecture(da) => {
                lines.push(format!("Locator:        {}", da.locator_id));
            }
            ConfigDefinitionResponse::Resource(resource) => {
                lines.push(format!("Resources:      {}", resource.resource_crns.len()));
            }
            ConfigDefinitionResponse::Stack(stack) => {
                let members: Vec<&str> = stack.members.iter().map(|m| m.name.as_str()).collect();
                lines.push(format!("Members:        {}", members.join(", ")));
            }
        }

        if let Some(environment) = self.definition.environment_id() {
            lines.push(format!("Environment:    {}", environment));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Environment {
    fn pretty_print(&self) -> String {
        let header = format!("Environment: {}", self.id);
        let divider = "─".repeat(header.len().max(30));

        let mut lines = vec![header, divider, format!("Name:           {}", self.name())];

        if let Some(ref description) = self.definition.description {
            lines.push(format!("Description:    {}", description));
        }

        if let Some(ref profile) = self.definition.compliance_profile {
            if let Some(ref name) = profile.profile_name {
                lines.push(format!("Compliance:     {}", name));
            }
        }

        if let Some(ref inputs) = self.definition.inputs {
            lines.push(format!("Inputs:         {}", inputs.len()));
        }

        lines.join("\n")
    }
}
