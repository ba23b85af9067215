//! Delete trait for removing entities.

use async_trait::async_trait;

use crate::client::ProjectsClient;
use crate::error::Result;

/// Delete an entity by ID.
#[async_trait]
pub trait Delete {
    /// The ID type for this entity.
    type Id;

    /// Delete the entity.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectsError::NotFound`](crate::ProjectsError::NotFound) if
    /// the entity does not exist, or the transport error if the request fails.
    async fn delete(client: &ProjectsClient, id: Self::Id) -> Result<()>;
}
