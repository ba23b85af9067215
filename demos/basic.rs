//! Basic example demonstrating the Cloud Projects API client.
//!
//! Run with:
//! ```
//! PROJECTS_AUTH_TOKEN=your-token cargo run --example basic
//! ```

use std::num::NonZeroU32;

use cloudprojects::{
    ConfigDefinitionResponse, Get, List, PaginationParams, Project, ProjectsClient,
};

#[tokio::main]
async fn main() -> cloudprojects::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    // Create client from environment variables
    println!("Creating Cloud Projects client...");
    let client = ProjectsClient::from_env()?;
    println!("Connected to: {}", client.base_url());

    // List first page of projects
    println!("\n--- Listing Projects (first page) ---");
    let params = PaginationParams {
        limit: Some(10),
        token: None,
    };
    let projects_page = Project::list_page(&client, &(), &params).await?;
    println!("Found {} projects on this page", projects_page.len());

    for project in &projects_page {
        println!("  - {} ({})", project.name(), project.id);
    }

    if let Some(token) = projects_page.next_token()? {
        println!("  ... more available, resume with token {token}");
    }

    // Get a specific project (using the first one from the list)
    if let Some(first_project) = projects_page.items.first() {
        println!("\n--- Getting Project Details ---");
        let project = Project::get(&client, first_project.id.clone()).await?;
        println!("Project: {}", project.name());
        println!("  ID: {}", project.id);
        println!("  Location: {}", project.location.as_deref().unwrap_or("unknown"));
        println!("  State: {}", project.state.as_deref().unwrap_or("unknown"));

        // Walk the project's configurations page by page
        println!("\n--- Configurations ---");
        let mut pager =
            cloudprojects::ProjectConfig::pager(&client, project.id.clone(), NonZeroU32::new(5));
        let mut page_number = 0;
        while pager.has_next() {
            page_number += 1;
            let configs = pager.get_next().await?;
            println!("Page {page_number}: {} configurations", configs.len());

            for config in &configs {
                let detail = match &config.definition {
                    ConfigDefinitionResponse::DeployableArchitecture(da) => {
                        format!("locator {}", da.locator_id)
                    }
                    ConfigDefinitionResponse::Resource(resource) => {
                        format!("{} resources", resource.resource_crns.len())
                    }
                    ConfigDefinitionResponse::Stack(stack) => {
                        format!("{} members", stack.members.len())
                    }
                };
                println!("  - {} [{}] {}", config.name(), config.kind(), detail);
            }
        }

        // Environments and deployed resources
        println!("\n--- Environments ---");
        for environment in project.environments(&client).await? {
            println!("  - {} ({})", environment.name(), environment.id);
        }

        println!("\n--- Deployed Resources ---");
        let resources = project.resources(&client).await?;
        println!("Found {} resources", resources.len());
        for resource in resources.iter().take(5) {
            println!(
                "  - {} ({})",
                resource.display_name(),
                resource.resource_type.as_deref().unwrap_or("unknown")
            );
        }
    }

    println!("\nDone!");
    Ok(())
}
