//! Get trait for fetching single entities.

use async_trait::async_trait;

use crate::client::ProjectsClient;
use crate::error::Result;

/// Fetch a single entity by ID.
///
/// Implement this trait for entity types that can be fetched individually.
/// Entities nested under a project use a `(project_id, id)` pair.
///
/// # Example
///
/// ```ignore
/// use cloudprojects::{ProjectsClient, Project, Get};
///
/// let client = ProjectsClient::from_env()?;
/// let project = Project::get(&client, "a1b2c3".to_string()).await?;
/// ```
#[async_trait]
pub trait Get: Sized {
    /// The ID type for this entity.
    type Id;

    /// Fetch the entity by ID.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectsError::NotFound`](crate::ProjectsError::NotFound) if
    /// the entity does not exist, or the transport error if the request fails.
    async fn get(client: &ProjectsClient, id: Self::Id) -> Result<Self>;
}
