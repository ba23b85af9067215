//! Project resource model.
//!
//! Resources are the cloud resources a project has deployed. They are only
//! listed; their lifecycle is driven by the configurations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::{read_json, ProjectsClient};
use crate::error::Result;
use crate::pagination::{Page, PageMeta, PaginationParams};
use crate::traits::List;

/// A resource deployed by a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectResource {
    /// Cloud resource name.
    pub resource_crn: String,

    #[serde(default)]
    pub resource_name: Option<String>,

    #[serde(default)]
    pub resource_type: Option<String>,

    /// Deployment status (e.g. "active", "failed").
    #[serde(default)]
    pub resource_status: Option<String>,

    #[serde(default)]
    pub account_id: Option<String>,

    #[serde(default)]
    pub location: Option<String>,

    #[serde(default)]
    pub resource_group_id: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,
}

impl ProjectResource {
    /// Display name, falling back to the CRN.
    pub fn display_name(&self) -> &str {
        self.resource_name.as_deref().unwrap_or(&self.resource_crn)
    }
}

/// API response wrapper for listing resources.
#[derive(Debug, Deserialize)]
struct ResourceListResponse {
    #[serde(flatten)]
    meta: PageMeta,
    #[serde(default)]
    resources: Vec<ProjectResource>,
}

#[async_trait]
impl List for ProjectResource {
    type Query = String; // Project ID

    #[tracing::instrument(skip(client))]
    async fn list_page(
        client: &ProjectsClient,
        project_id: &Self::Query,
        params: &PaginationParams,
    ) -> Result<Page<Self>> {
        let path = format!("v1/projects/{}/resources", urlencoding::encode(project_id));
        let response = client
            .get_with_query(&path, params)
            .await
            .map_err(|e| e.or_not_found("project", project_id))?;
        let data: ResourceListResponse = read_json(response).await?;

        Ok(data.meta.into_page(data.resources))
    }
}
