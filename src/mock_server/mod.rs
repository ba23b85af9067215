//! Mock Cloud Projects API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the Cloud
//! Projects API for integration and end-to-end testing. Unlike wiremock which
//! mocks at the HTTP level per-test, this server maintains state across
//! requests and pages its list endpoints with real continuation tokens.
//!
//! # Example
//!
//! ```ignore
//! use cloudprojects::mock_server::MockServer;
//! use cloudprojects::{ProjectsClient, Project, Get};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = ProjectsClient::new("test-token", server.url()).unwrap();
//!
//!     // Server comes with default fixtures
//!     let project = Project::get(&client, "proj-landing-zone".to_string()).await.unwrap();
//!     assert_eq!(project.name(), "Landing Zone");
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::{DefaultScenario, Fixtures};
pub use server::MockServer;
pub use state::MockState;
