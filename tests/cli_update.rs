//! Execution tests for create, update and delete operations.
//!
//! Uses wiremock to mock the Cloud Projects API and check the request bodies
//! the client sends.

use cloudprojects::{
    ConfigPatch, ConfigPrototype, Create, DaDefinitionPatch, Delete, DefinitionKind, Environment,
    EnvironmentDefinition, EnvironmentPrototype, Project, ProjectConfig, ProjectDefinition,
    ProjectPatch, ProjectPrototype, ProjectsClient, ProjectsError, StackDefinitionPrototype,
    StackMember, Update,
};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_update_project_wraps_patch_in_definition() {
    let mock_server = MockServer::start().await;

    let expected_body = serde_json::json!({
        "definition": {"name": "Renamed", "monitoring_enabled": true}
    });

    Mock::given(method("PATCH"))
        .and(path("/v1/projects/a1b2c3"))
        .and(body_json(&expected_body))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "a1b2c3",
            "definition": {"name": "Renamed", "monitoring_enabled": true}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ProjectsClient::new("test-token", &mock_server.uri()).unwrap();
    let patch = ProjectPatch {
        name: Some("Renamed".to_string()),
        monitoring_enabled: Some(true),
        ..Default::default()
    };

    let project = Project::update(&client, "a1b2c3".to_string(), patch)
        .await
        .unwrap();

    assert_eq!(project.name(), "Renamed");
    assert!(project.definition.monitoring_enabled);
}

#[tokio::test]
async fn test_create_project_sends_prototype() {
    let mock_server = MockServer::start().await;

    let expected_body = serde_json::json!({
        "definition": {
            "name": "Landing Zone",
            "destroy_on_delete": true,
            "auto_deploy": false,
            "monitoring_enabled": false
        },
        "location": "us-south",
        "resource_group": "Default"
    });

    Mock::given(method("POST"))
        .and(path("/v1/projects"))
        .and(body_json(&expected_body))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": "new-id",
            "location": "us-south",
            "definition": {"name": "Landing Zone", "destroy_on_delete": true}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ProjectsClient::new("test-token", &mock_server.uri()).unwrap();
    let prototype = ProjectPrototype {
        definition: ProjectDefinition {
            name: "Landing Zone".to_string(),
            destroy_on_delete: true,
            ..Default::default()
        },
        location: "us-south".to_string(),
        resource_group: "Default".to_string(),
        ..Default::default()
    };

    let project = Project::create(&client, (), prototype).await.unwrap();

    assert_eq!(project.id, "new-id");
    assert_eq!(project.location.as_deref(), Some("us-south"));
}

#[tokio::test]
async fn test_create_stack_config_sends_untagged_definition() {
    let mock_server = MockServer::start().await;

    let expected_body = serde_json::json!({
        "definition": {
            "name": "landing-zone",
            "members": [{"name": "network", "config_id": "cfg-1"}]
        }
    });

    Mock::given(method("POST"))
        .and(path("/v1/projects/p1/configs"))
        .and(body_json(&expected_body))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": "cfg-9",
            "version": 1,
            "definition": {
                "description": "",
                "name": "landing-zone",
                "members": [{"name": "network", "config_id": "cfg-1"}]
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ProjectsClient::new("test-token", &mock_server.uri()).unwrap();
    let prototype = ConfigPrototype {
        definition: StackDefinitionPrototype {
            name: "landing-zone".to_string(),
            description: None,
            members: vec![StackMember {
                name: "network".to_string(),
                config_id: "cfg-1".to_string(),
            }],
            environment_id: None,
            inputs: None,
        }
        .into(),
    };

    let config = ProjectConfig::create(&client, "p1".to_string(), prototype)
        .await
        .unwrap();

    assert_eq!(config.id, "cfg-9");
    assert_eq!(config.kind(), DefinitionKind::Stack);
}

#[tokio::test]
async fn test_update_config_sends_only_patched_fields() {
    let mock_server = MockServer::start().await;

    let expected_body = serde_json::json!({
        "definition": {"locator_id": "loc-2"}
    });

    Mock::given(method("PATCH"))
        .and(path("/v1/projects/p1/configs/cfg-1"))
        .and(body_json(&expected_body))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "cfg-1",
            "version": 2,
            "definition": {"description": "VPC", "name": "network", "locator_id": "loc-2"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ProjectsClient::new("test-token", &mock_server.uri()).unwrap();
    let patch = ConfigPatch {
        definition: DaDefinitionPatch::new("loc-2").into(),
    };

    let config = ProjectConfig::update(&client, ("p1".to_string(), "cfg-1".to_string()), patch)
        .await
        .unwrap();

    assert_eq!(config.version, Some(2));
    assert_eq!(config.definition.locator_id(), Some("loc-2"));
}

#[tokio::test]
async fn test_create_environment() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/projects/p1/environments"))
        .and(body_json(serde_json::json!({
            "definition": {"name": "staging", "description": "Pre-production"}
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": "env-7",
            "definition": {"name": "staging", "description": "Pre-production"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ProjectsClient::new("test-token", &mock_server.uri()).unwrap();
    let prototype = EnvironmentPrototype {
        definition: EnvironmentDefinition {
            name: "staging".to_string(),
            description: Some("Pre-production".to_string()),
            ..Default::default()
        },
    };

    let environment = Environment::create(&client, "p1".to_string(), prototype)
        .await
        .unwrap();

    assert_eq!(environment.id, "env-7");
}

#[tokio::test]
async fn test_delete_config() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/v1/projects/p1/configs/cfg-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "cfg-1"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ProjectsClient::new("test-token", &mock_server.uri()).unwrap();
    ProjectConfig::delete(&client, ("p1".to_string(), "cfg-1".to_string()))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_delete_missing_project_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/v1/projects/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = ProjectsClient::new("test-token", &mock_server.uri()).unwrap();
    let err = Project::delete(&client, "gone".to_string()).await.unwrap_err();

    assert!(matches!(err, ProjectsError::NotFound { entity_type: "project", .. }));
}
