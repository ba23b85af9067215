//! List trait for fetching collections of entities.

use std::num::NonZeroU32;

use async_trait::async_trait;

use crate::client::ProjectsClient;
use crate::error::Result;
use crate::pagination::{ListCall, Page, Pager, PaginationParams};

/// List entities with cursor pagination.
///
/// Implementors fetch a single page; [`List::pager`] and [`List::list_all`]
/// walk the cursor chain on top of that.
///
/// # Example
///
/// ```ignore
/// use cloudprojects::{ProjectsClient, Project, List};
///
/// let client = ProjectsClient::from_env()?;
///
/// // Fetch a single page
/// let page = Project::list_page(&client, &Default::default(), &Default::default()).await?;
///
/// // Fetch all pages
/// let all_projects = Project::list_all(&client, &Default::default()).await?;
/// ```
#[async_trait]
pub trait List: Sized + Send {
    /// Query identifying the collection (e.g. the owning project ID).
    type Query: Default + Clone + Send + Sync;

    /// Fetch one page of the collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    async fn list_page(
        client: &ProjectsClient,
        query: &Self::Query,
        params: &PaginationParams,
    ) -> Result<Page<Self>>;

    /// Create a pager over the collection.
    ///
    /// Without a limit the server's default page size applies.
    fn pager(
        client: &ProjectsClient,
        query: Self::Query,
        limit: Option<NonZeroU32>,
    ) -> Pager<Lister<'_, Self>> {
        Pager::new(Lister::new(client, query), limit)
    }

    /// List every entity in the collection, following the cursor chain.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    async fn list_all(client: &ProjectsClient, query: &Self::Query) -> Result<Vec<Self>> {
        Self::pager(client, query.clone(), None).get_all().await
    }
}

/// A [`ListCall`] bound to one collection of a [`List`] entity.
pub struct Lister<'a, T: List> {
    client: &'a ProjectsClient,
    query: T::Query,
}

impl<'a, T: List> Lister<'a, T> {
    /// Bind a collection query to a client.
    pub fn new(client: &'a ProjectsClient, query: T::Query) -> Self {
        Self { client, query }
    }
}

impl<T: List> std::fmt::Debug for Lister<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lister")
            .field("client", self.client)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<'a, T: List> ListCall for Lister<'a, T> {
    type Item = T;

    async fn call(&mut self, limit: Option<u32>, token: Option<String>) -> Result<Page<T>> {
        let params = PaginationParams { limit, token };
        T::list_page(self.client, &self.query, &params).await
    }
}
