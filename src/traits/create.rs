//! Create trait for adding entities.

use async_trait::async_trait;

use crate::client::ProjectsClient;
use crate::error::Result;

/// Create a new entity.
///
/// Top-level entities use `()` as their parent; entities nested under a
/// project take the project ID.
///
/// # Example
///
/// ```ignore
/// use cloudprojects::{ProjectsClient, ProjectConfig, ConfigPrototype, Create};
///
/// let client = ProjectsClient::from_env()?;
/// let config = ProjectConfig::create(&client, project_id, prototype).await?;
/// ```
#[async_trait]
pub trait Create: Sized {
    /// Identifier of the owning entity.
    type Parent;

    /// Request body describing the new entity.
    type Params;

    /// Create the entity and return it as stored by the service.
    ///
    /// # Errors
    ///
    /// Returns an error if the request is rejected or fails.
    async fn create(client: &ProjectsClient, parent: Self::Parent, params: Self::Params)
        -> Result<Self>;
}
