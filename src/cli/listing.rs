//! Fetching and rendering for the `list` command.

use std::num::NonZeroU32;

use serde::Serialize;
use tabled::{Table, Tabled};

use crate::{
    Environment, List, PaginationParams, Project, ProjectConfig, ProjectResource, ProjectsClient,
    Result,
};

/// Pagination flags of the `list` command.
#[derive(Debug, Clone, Default)]
pub struct Paging {
    pub limit: Option<NonZeroU32>,
    pub token: Option<String>,
    pub all: bool,
}

/// Rendered output of one `list` invocation.
#[derive(Debug)]
pub struct Listing {
    /// Table or JSON text for stdout.
    pub body: String,
    /// Token to resume from, if the server has more pages.
    pub next_token: Option<String>,
}

/// Fetch one page (or every page with `--all`) and render it.
pub async fn list_entity<T, R, F>(
    client: &ProjectsClient,
    query: T::Query,
    paging: Paging,
    json: bool,
    to_row: F,
) -> Result<Listing>
where
    T: List + Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    let (items, next_token) = if paging.all {
        let items = T::pager(client, query, paging.limit).get_all().await?;
        (items, None)
    } else {
        let params = PaginationParams {
            limit: paging.limit.map(NonZeroU32::get),
            token: paging.token,
        };
        let page = T::list_page(client, &query, &params).await?;
        let next = page.next_token()?;
        (page.items, next)
    };

    Ok(Listing {
        body: render_items(&items, json, to_row)?,
        next_token,
    })
}

/// Render items as pretty JSON, or as a table followed by a count.
pub fn render_items<T, R, F>(items: &[T], json: bool, to_row: F) -> Result<String>
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    if json {
        return Ok(serde_json::to_string_pretty(items)?);
    }
    let rows: Vec<R> = items.iter().map(to_row).collect();
    Ok(format!("{}\n\n{} items", Table::new(rows), items.len()))
}

// Table row types for non-JSON output

#[derive(Tabled)]
pub struct ProjectRow {
    id: String,
    name: String,
    location: String,
    state: String,
}

impl From<&Project> for ProjectRow {
    fn from(p: &Project) -> Self {
        Self {
            id: p.id.clone(),
            name: p.name().to_string(),
            location: p.location.clone().unwrap_or_default(),
            state: p.state.clone().unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
pub struct ConfigRow {
    id: String,
    name: String,
    kind: String,
    state: String,
}

impl From<&ProjectConfig> for ConfigRow {
    fn from(c: &ProjectConfig) -> Self {
        Self {
            id: c.id.clone(),
            name: c.name().to_string(),
            kind: c.kind().to_string(),
            state: c.state.clone().unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
pub struct EnvironmentRow {
    id: String,
    name: String,
    description: String,
}

impl From<&Environment> for EnvironmentRow {
    fn from(e: &Environment) -> Self {
        Self {
            id: e.id.clone(),
            name: e.name().to_string(),
            description: e.definition.description.clone().unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
pub struct ResourceRow {
    name: String,
    #[tabled(rename = "type")]
    resource_type: String,
    status: String,
    crn: String,
}

impl From<&ProjectResource> for ResourceRow {
    fn from(r: &ProjectResource) -> Self {
        Self {
            name: r.display_name().to_string(),
            resource_type: r.resource_type.clone().unwrap_or_default(),
            status: r.resource_status.clone().unwrap_or_default(),
            crn: r.resource_crn.clone(),
        }
    }
}
