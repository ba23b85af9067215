//! Execution tests for the get command.
//!
//! Uses wiremock to mock the Cloud Projects API and test actual execution flow.

use cloudprojects::{
    get_config, ConfigDefinitionResponse, DecodeError, DefinitionFamily, DefinitionKind,
    Environment, Get, Project, ProjectConfig, ProjectsClient, ProjectsError,
};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_get_project_returns_entity() {
    let mock_server = MockServer::start().await;

    let project_json = serde_json::json!({
        "id": "a1b2c3",
        "state": "ready",
        "location": "us-south",
        "definition": {"name": "Landing Zone", "auto_deploy": true}
    });

    Mock::given(method("GET"))
        .and(path("/v1/projects/a1b2c3"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&project_json))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ProjectsClient::new("test-token", &mock_server.uri()).unwrap();
    let project = Project::get(&client, "a1b2c3".to_string()).await.unwrap();

    assert_eq!(project.name(), "Landing Zone");
    assert!(project.definition.auto_deploy);
    assert!(!project.definition.destroy_on_delete);
}

#[tokio::test]
async fn test_get_project_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/projects/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "status_code": 404,
            "errors": [{"code": "not_found", "message": "Project not found"}]
        })))
        .mount(&mock_server)
        .await;

    let client = ProjectsClient::new("test-token", &mock_server.uri()).unwrap();
    let err = Project::get(&client, "missing".to_string()).await.unwrap_err();

    match err {
        ProjectsError::NotFound { entity_type, id } => {
            assert_eq!(entity_type, "project");
            assert_eq!(id, "missing");
        }
        other => panic!("Expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn test_get_surfaces_api_error_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/projects/p1"))
        .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
            "errors": [{"code": "forbidden", "message": "Token lacks the Viewer role"}]
        })))
        .mount(&mock_server)
        .await;

    let client = ProjectsClient::new("test-token", &mock_server.uri()).unwrap();
    let err = Project::get(&client, "p1".to_string()).await.unwrap_err();

    match err {
        ProjectsError::ApiError {
            message,
            status_code,
        } => {
            assert_eq!(message, "Token lacks the Viewer role");
            assert_eq!(status_code, Some(403));
        }
        other => panic!("Expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_get_rate_limited() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/projects/p1"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "30"))
        .mount(&mock_server)
        .await;

    let client = ProjectsClient::new("test-token", &mock_server.uri()).unwrap();
    let err = Project::get(&client, "p1".to_string()).await.unwrap_err();

    assert!(matches!(
        err,
        ProjectsError::RateLimited {
            retry_after_secs: Some(30)
        }
    ));
}

#[tokio::test]
async fn test_get_config_resolves_resource_variant() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/projects/p1/configs/cfg-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "cfg-1",
            "version": 1,
            "definition": {
                "description": "Existing resources",
                "name": "existing",
                "resource_crns": ["crn:v1:a", "crn:v1:b"]
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ProjectsClient::new("test-token", &mock_server.uri()).unwrap();
    let config = get_config(&client, "p1", "cfg-1").await.unwrap();

    assert_eq!(config.kind(), DefinitionKind::Resource);
    match config.definition {
        ConfigDefinitionResponse::Resource(resource) => {
            assert_eq!(resource.resource_crns, vec!["crn:v1:a", "crn:v1:b"]);
        }
        other => panic!("Expected resource definition, got {other:?}"),
    }
}

#[tokio::test]
async fn test_get_config_with_incomplete_definition_names_missing_field() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/projects/p1/configs/cfg-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "cfg-1",
            "definition": {"name": "vpc", "locator_id": "loc-1"}
        })))
        .mount(&mock_server)
        .await;

    let client = ProjectsClient::new("test-token", &mock_server.uri()).unwrap();
    let err = ProjectConfig::get(&client, ("p1".to_string(), "cfg-1".to_string()))
        .await
        .unwrap_err();

    match err {
        ProjectsError::Decode(decode) => assert_eq!(
            decode,
            DecodeError::MissingField {
                family: DefinitionFamily::Response,
                field: "description",
            }
        ),
        other => panic!("Expected Decode error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_get_environment() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/projects/p1/environments/env-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "env-1",
            "project": {"id": "p1"},
            "definition": {
                "name": "development",
                "authorizations": {"method": "api_key"}
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ProjectsClient::new("test-token", &mock_server.uri()).unwrap();
    let environment = Environment::get(&client, ("p1".to_string(), "env-1".to_string()))
        .await
        .unwrap();

    assert_eq!(environment.name(), "development");
    assert_eq!(environment.project.unwrap().id, "p1");
    assert_eq!(
        environment.definition.authorizations.unwrap().method.as_deref(),
        Some("api_key")
    );
}
