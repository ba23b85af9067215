//! Tests for CLI output formatting.
//!
//! - JSON output with --json flag
//! - Pretty-print output as default

use cloudprojects::{Environment, PrettyPrint, Project, ProjectConfig};

// ============================================================================
// JSON Output Tests
// ============================================================================

#[test]
fn test_json_flag_outputs_valid_json() {
    let project = make_test_project();
    let json_output = serde_json::to_string_pretty(&project).unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&json_output).unwrap();
    assert!(parsed.is_object());
    assert_eq!(parsed["definition"]["name"], "Landing Zone");
}

#[test]
fn test_json_flag_for_list_outputs_array() {
    let projects = vec![make_test_project(), make_test_project()];
    let json_output = serde_json::to_string_pretty(&projects).unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&json_output).unwrap();
    assert!(parsed.is_array());
    assert_eq!(parsed.as_array().unwrap().len(), 2);
}

#[test]
fn test_config_json_keeps_variant_fields_untagged() {
    // The definition is written back in the API's shape, without a variant tag
    let config = make_test_config();
    let parsed = serde_json::to_value(&config).unwrap();

    let definition = parsed["definition"].as_object().unwrap();
    assert_eq!(definition["locator_id"], "loc-1");
    assert!(!definition.contains_key("DeployableArchitecture"));
    assert!(!definition.contains_key("members"));
}

// ============================================================================
// Pretty-Print Tests
// ============================================================================

#[test]
fn test_default_output_is_not_json() {
    let project = make_test_project();
    let pretty_output = project.pretty_print();

    let parse_result: Result<serde_json::Value, _> = serde_json::from_str(&pretty_output);
    assert!(
        parse_result.is_err(),
        "Default output should NOT be valid JSON"
    );
}

#[test]
fn test_project_pretty_print_shows_key_fields() {
    let project = make_test_project();
    let output = project.pretty_print();

    assert!(output.contains("a1b2c3"), "Should show ID");
    assert!(output.contains("Landing Zone"), "Should show name");
    assert!(output.contains("us-south"), "Should show location");
    assert!(output.contains("2024-03-01 12:00:00 UTC"), "Should show creation time");
}

#[test]
fn test_config_pretty_print_shows_variant() {
    let config = make_test_config();
    let output = config.pretty_print();

    assert!(output.contains("deployable_architecture"), "Should show kind");
    assert!(output.contains("Locator:        loc-1"));
    assert!(output.contains("Environment:    env-1"));
}

#[test]
fn test_stack_config_pretty_print_lists_members() {
    let config: ProjectConfig = serde_json::from_value(serde_json::json!({
        "id": "cfg-stack",
        "definition": {
            "description": "stack",
            "name": "landing-zone",
            "members": [
                {"name": "network", "config_id": "cfg-1"},
                {"name": "compute", "config_id": "cfg-2"}
            ]
        }
    }))
    .unwrap();

    let output = config.pretty_print();
    assert!(output.contains("Members:        network, compute"));
}

#[test]
fn test_environment_pretty_print_shows_compliance() {
    let environment: Environment = serde_json::from_value(serde_json::json!({
        "id": "env-1",
        "definition": {
            "name": "production",
            "description": "Prod account",
            "compliance_profile": {"profile_name": "FS Cloud"},
            "inputs": {"region": "us-south", "zones": 3}
        }
    }))
    .unwrap();

    let output = environment.pretty_print();
    assert!(output.starts_with("Environment: env-1"));
    assert!(output.contains("Compliance:     FS Cloud"));
    assert!(output.contains("Inputs:         2"));
}

#[test]
fn test_list_pretty_print_is_table() {
    use tabled::{Table, Tabled};

    #[derive(Tabled)]
    struct TestRow {
        name: String,
        kind: String,
    }

    let rows = vec![
        TestRow {
            name: "network".to_string(),
            kind: "stack".to_string(),
        },
        TestRow {
            name: "existing".to_string(),
            kind: "resource".to_string(),
        },
    ];

    let table_output = Table::new(rows).to_string();

    assert!(table_output.contains("name"), "Should have column headers");
    assert!(table_output.contains("kind"), "Should have column headers");
}

// ============================================================================
// Test Helpers
// ============================================================================

fn make_test_project() -> Project {
    serde_json::from_value(serde_json::json!({
        "id": "a1b2c3",
        "crn": "crn:v1:bluemix:public:project:us-south:a/acct:a1b2c3::",
        "created_at": "2024-03-01T12:00:00Z",
        "state": "ready",
        "location": "us-south",
        "definition": {
            "name": "Landing Zone",
            "description": "Shared network",
            "destroy_on_delete": true
        }
    }))
    .unwrap()
}

fn make_test_config() -> ProjectConfig {
    serde_json::from_value(serde_json::json!({
        "id": "cfg-1",
        "version": 2,
        "state": "deployed",
        "definition": {
            "description": "VPC",
            "name": "network",
            "locator_id": "loc-1",
            "environment_id": "env-1"
        }
    }))
    .unwrap()
}
