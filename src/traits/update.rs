//! Update trait for modifying entities.

use async_trait::async_trait;

use crate::client::ProjectsClient;
use crate::error::Result;

/// Update an existing entity.
///
/// # Example
///
/// ```ignore
/// use cloudprojects::{ProjectsClient, Project, Update, ProjectPatch};
///
/// let client = ProjectsClient::from_env()?;
/// let updated = Project::update(
///     &client,
///     "a1b2c3".to_string(),
///     ProjectPatch {
///         name: Some("New Name".to_string()),
///         ..Default::default()
///     },
/// ).await?;
/// ```
#[async_trait]
pub trait Update: Sized {
    /// The ID type for this entity.
    type Id;

    /// Parameters for the update.
    type Params;

    /// Update the entity and return the updated version.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found or the request fails.
    async fn update(client: &ProjectsClient, id: Self::Id, params: Self::Params) -> Result<Self>;
}
