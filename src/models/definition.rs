//! Configuration definition payloads.
//!
//! A configuration's `definition` comes in three shapes: a deployable
//! architecture (identified by `locator_id`), a set of existing resources
//! (`resource_crns`), or a stack of member configurations (`members`).
//! Payloads carry no type tag, so each family is decoded structurally:
//!
//! | signal field    | variant                  |
//! |-----------------|--------------------------|
//! | `members`       | stack                    |
//! | `resource_crns` | resource                 |
//! | `locator_id`    | deployable architecture  |
//!
//! Signals are checked in that order. A signal counts when its key holds a
//! non-null value, and more than one signal is rejected as ambiguous.
//!
//! When no signal is present, the prototype and response families fall back
//! to the deployable-architecture variant, which then reports `locator_id` as
//! missing. The patch family has no fallback.

use std::fmt;

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::DecodeError;

/// Free-form input or setting values keyed by name.
pub type ConfigValues = Map<String, Value>;

const SIGNALS: [(&str, DefinitionKind); 3] = [
    ("members", DefinitionKind::Stack),
    ("resource_crns", DefinitionKind::Resource),
    ("locator_id", DefinitionKind::DeployableArchitecture),
];

const SIGNAL_FIELDS: [&str; 3] = ["members", "resource_crns", "locator_id"];

/// Which payload family is being decoded.
///
/// Chosen by the caller from context (request body vs. response body),
/// never from the payload itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefinitionFamily {
    /// Definitions sent when creating a configuration.
    Prototype,
    /// Definitions sent when updating a configuration.
    Patch,
    /// Definitions returned by the API.
    Response,
}

impl fmt::Display for DefinitionFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Prototype => "prototype",
            Self::Patch => "patch",
            Self::Response => "response",
        })
    }
}

/// The variant a definition resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefinitionKind {
    /// A stack of member configurations.
    Stack,
    /// A set of existing resources identified by CRN.
    Resource,
    /// A deployable architecture from the catalog.
    DeployableArchitecture,
}

impl fmt::Display for DefinitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Stack => "stack",
            Self::Resource => "resource",
            Self::DeployableArchitecture => "deployable_architecture",
        })
    }
}

/// A closed family of definition variants resolved by structure.
pub trait Polymorphic: Sized {
    /// The family this type decodes.
    const FAMILY: DefinitionFamily;

    /// Resolve a JSON object to one variant of the family.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] naming the family and the offending field.
    fn decode(map: &Map<String, Value>) -> Result<Self, DecodeError>;

    /// The variant this value holds.
    fn kind(&self) -> DefinitionKind;
}

/// Decode a JSON value into a definition family.
///
/// # Errors
///
/// Returns [`DecodeError::NotAnObject`] for non-object input, otherwise
/// whatever [`Polymorphic::decode`] reports.
pub fn decode<V: Polymorphic>(value: &Value) -> Result<V, DecodeError> {
    let map = value
        .as_object()
        .ok_or(DecodeError::NotAnObject { family: V::FAMILY })?;
    V::decode(map)
}

fn is_present(map: &Map<String, Value>, field: &str) -> bool {
    map.get(field).is_some_and(|v| !v.is_null())
}

fn resolve_kind(
    family: DefinitionFamily,
    map: &Map<String, Value>,
    fallback: Option<DefinitionKind>,
) -> Result<DefinitionKind, DecodeError> {
    let present: Vec<(&'static str, DefinitionKind)> = SIGNALS
        .iter()
        .copied()
        .filter(|(field, _)| is_present(map, field))
        .collect();

    match present.as_slice() {
        [] => fallback.ok_or(DecodeError::Unresolved {
            family,
            expected: &SIGNAL_FIELDS,
        }),
        [(_, kind)] => Ok(*kind),
        _ => Err(DecodeError::Ambiguous {
            family,
            fields: present.iter().map(|(field, _)| *field).collect(),
        }),
    }
}

fn require(
    family: DefinitionFamily,
    map: &Map<String, Value>,
    fields: &[&'static str],
) -> Result<(), DecodeError> {
    match fields.iter().find(|field| !is_present(map, field)) {
        Some(&field) => Err(DecodeError::MissingField { family, field }),
        None => Ok(()),
    }
}

fn materialize<T: DeserializeOwned>(
    family: DefinitionFamily,
    map: &Map<String, Value>,
) -> Result<T, DecodeError> {
    serde_json::from_value(Value::Object(map.clone())).map_err(|e| DecodeError::InvalidField {
        family,
        message: e.to_string(),
    })
}

// =============================================================================
// Shared definition parts
// =============================================================================

/// How the service authorizes against the target account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigAuth {
    /// Trusted profile used for authorization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trusted_profile_id: Option<String>,
    /// Authorization method (`api_key` or `trusted_profile`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// API key, or a secrets-manager reference to one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

/// Compliance profile attached to a configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_name: Option<String>,
}

/// A configuration that belongs to a stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackMember {
    /// Member name within the stack.
    pub name: String,
    /// ID of the member configuration.
    pub config_id: String,
}

// =============================================================================
// Prototype family
// =============================================================================

/// Deployable architecture definition for a create request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaDefinitionPrototype {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Catalog locator of the deployable architecture version.
    pub locator_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorizations: Option<ConfigAuth>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compliance_profile: Option<ComplianceProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inputs: Option<ConfigValues>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<ConfigValues>,
}

/// Resource definition for a create request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceDefinitionPrototype {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// CRNs of the resources this configuration manages.
    pub resource_crns: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorizations: Option<ConfigAuth>,
}

/// Stack definition for a create request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackDefinitionPrototype {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub members: Vec<StackMember>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inputs: Option<ConfigValues>,
}

/// The definition of a configuration being created.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ConfigDefinitionPrototype {
    Stack(StackDefinitionPrototype),
    Resource(ResourceDefinitionPrototype),
    DeployableArchitecture(DaDefinitionPrototype),
}

impl ConfigDefinitionPrototype {
    /// The configuration name.
    pub fn name(&self) -> &str {
        match self {
            Self::Stack(d) => &d.name,
            Self::Resource(d) => &d.name,
            Self::DeployableArchitecture(d) => &d.name,
        }
    }
}

impl Polymorphic for ConfigDefinitionPrototype {
    const FAMILY: DefinitionFamily = DefinitionFamily::Prototype;

    fn decode(map: &Map<String, Value>) -> Result<Self, DecodeError> {
        let family = Self::FAMILY;
        match resolve_kind(family, map, Some(DefinitionKind::DeployableArchitecture))? {
            DefinitionKind::Stack => {
                require(family, map, &["name", "members"])?;
                materialize(family, map).map(Self::Stack)
            }
            DefinitionKind::Resource => {
                require(family, map, &["name", "resource_crns"])?;
                materialize(family, map).map(Self::Resource)
            }
            DefinitionKind::DeployableArchitecture => {
                require(family, map, &["name", "locator_id"])?;
                materialize(family, map).map(Self::DeployableArchitecture)
            }
        }
    }

    fn kind(&self) -> DefinitionKind {
        match self {
            Self::Stack(_) => DefinitionKind::Stack,
            Self::Resource(_) => DefinitionKind::Resource,
            Self::DeployableArchitecture(_) => DefinitionKind::DeployableArchitecture,
        }
    }
}

impl<'de> Deserialize<'de> for ConfigDefinitionPrototype {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        decode(&value).map_err(de::Error::custom)
    }
}

impl From<StackDefinitionPrototype> for ConfigDefinitionPrototype {
    fn from(definition: StackDefinitionPrototype) -> Self {
        Self::Stack(definition)
    }
}

impl From<ResourceDefinitionPrototype> for ConfigDefinitionPrototype {
    fn from(definition: ResourceDefinitionPrototype) -> Self {
        Self::Resource(definition)
    }
}

impl From<DaDefinitionPrototype> for ConfigDefinitionPrototype {
    fn from(definition: DaDefinitionPrototype) -> Self {
        Self::DeployableArchitecture(definition)
    }
}

// =============================================================================
// Patch family
// =============================================================================

/// Deployable architecture definition changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaDefinitionPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub locator_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorizations: Option<ConfigAuth>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compliance_profile: Option<ComplianceProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inputs: Option<ConfigValues>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<ConfigValues>,
}

/// Resource definition changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceDefinitionPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub resource_crns: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorizations: Option<ConfigAuth>,
}

/// Stack definition changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackDefinitionPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub members: Vec<StackMember>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inputs: Option<ConfigValues>,
}

impl DaDefinitionPatch {
    /// A patch against the deployable architecture at `locator_id` that
    /// changes nothing else.
    pub fn new(locator_id: impl Into<String>) -> Self {
        Self {
            name: None,
            description: None,
            locator_id: locator_id.into(),
            environment_id: None,
            authorizations: None,
            compliance_profile: None,
            inputs: None,
            settings: None,
        }
    }
}

impl ResourceDefinitionPatch {
    pub fn new(resource_crns: Vec<String>) -> Self {
        Self {
            name: None,
            description: None,
            resource_crns,
            environment_id: None,
            authorizations: None,
        }
    }
}

impl StackDefinitionPatch {
    pub fn new(members: Vec<StackMember>) -> Self {
        Self {
            name: None,
            description: None,
            members,
            environment_id: None,
            inputs: None,
        }
    }
}

/// Changes to the definition of an existing configuration.
///
/// Every patch variant carries its signal field, so a patch that only
/// renames a configuration still names its `locator_id`, `resource_crns`
/// or `members`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ConfigDefinitionPatch {
    Stack(StackDefinitionPatch),
    Resource(ResourceDefinitionPatch),
    DeployableArchitecture(DaDefinitionPatch),
}

impl Polymorphic for ConfigDefinitionPatch {
    const FAMILY: DefinitionFamily = DefinitionFamily::Patch;

    fn decode(map: &Map<String, Value>) -> Result<Self, DecodeError> {
        let family = Self::FAMILY;
        match resolve_kind(family, map, None)? {
            DefinitionKind::Stack => materialize(family, map).map(Self::Stack),
            DefinitionKind::Resource => materialize(family, map).map(Self::Resource),
            DefinitionKind::DeployableArchitecture => {
                materialize(family, map).map(Self::DeployableArchitecture)
            }
        }
    }

    fn kind(&self) -> DefinitionKind {
        match self {
            Self::Stack(_) => DefinitionKind::Stack,
            Self::Resource(_) => DefinitionKind::Resource,
            Self::DeployableArchitecture(_) => DefinitionKind::DeployableArchitecture,
        }
    }
}

impl<'de> Deserialize<'de> for ConfigDefinitionPatch {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        decode(&value).map_err(de::Error::custom)
    }
}

impl From<StackDefinitionPatch> for ConfigDefinitionPatch {
    fn from(patch: StackDefinitionPatch) -> Self {
        Self::Stack(patch)
    }
}

impl From<ResourceDefinitionPatch> for ConfigDefinitionPatch {
    fn from(patch: ResourceDefinitionPatch) -> Self {
        Self::Resource(patch)
    }
}

impl From<DaDefinitionPatch> for ConfigDefinitionPatch {
    fn from(patch: DaDefinitionPatch) -> Self {
        Self::DeployableArchitecture(patch)
    }
}

// =============================================================================
// Response family
// =============================================================================

/// Deployable architecture definition as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaDefinitionResponse {
    pub description: String,
    pub name: String,
    pub locator_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorizations: Option<ConfigAuth>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compliance_profile: Option<ComplianceProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inputs: Option<ConfigValues>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<ConfigValues>,
}

/// Resource definition as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceDefinitionResponse {
    pub description: String,
    pub name: String,
    pub resource_crns: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorizations: Option<ConfigAuth>,
}

/// Stack definition as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackDefinitionResponse {
    pub description: String,
    pub name: String,
    pub members: Vec<StackMember>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inputs: Option<ConfigValues>,
}

/// The definition of a configuration as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ConfigDefinitionResponse {
    Stack(StackDefinitionResponse),
    Resource(ResourceDefinitionResponse),
    DeployableArchitecture(DaDefinitionResponse),
}

impl ConfigDefinitionResponse {
    /// The configuration name.
    pub fn name(&self) -> &str {
        match self {
            Self::Stack(d) => &d.name,
            Self::Resource(d) => &d.name,
            Self::DeployableArchitecture(d) => &d.name,
        }
    }

    /// The configuration description.
    pub fn description(&self) -> &str {
        match self {
            Self::Stack(d) => &d.description,
            Self::Resource(d) => &d.description,
            Self::DeployableArchitecture(d) => &d.description,
        }
    }

    /// The environment the configuration is bound to, if any.
    pub fn environment_id(&self) -> Option<&str> {
        match self {
            Self::Stack(d) => d.environment_id.as_deref(),
            Self::Resource(d) => d.environment_id.as_deref(),
            Self::DeployableArchitecture(d) => d.environment_id.as_deref(),
        }
    }

    /// The catalog locator, for deployable architectures.
    pub fn locator_id(&self) -> Option<&str> {
        match self {
            Self::DeployableArchitecture(d) => Some(&d.locator_id),
            _ => None,
        }
    }
}

impl Polymorphic for ConfigDefinitionResponse {
    const FAMILY: DefinitionFamily = DefinitionFamily::Response;

    fn decode(map: &Map<String, Value>) -> Result<Self, DecodeError> {
        let family = Self::FAMILY;
        match resolve_kind(family, map, Some(DefinitionKind::DeployableArchitecture))? {
            DefinitionKind::Stack => {
                require(family, map, &["description", "name", "members"])?;
                materialize(family, map).map(Self::Stack)
            }
            DefinitionKind::Resource => {
                require(family, map, &["description", "name", "resource_crns"])?;
                materialize(family, map).map(Self::Resource)
            }
            DefinitionKind::DeployableArchitecture => {
                require(family, map, &["description", "name", "locator_id"])?;
                materialize(family, map).map(Self::DeployableArchitecture)
            }
        }
    }

    fn kind(&self) -> DefinitionKind {
        match self {
            Self::Stack(_) => DefinitionKind::Stack,
            Self::Resource(_) => DefinitionKind::Resource,
            Self::DeployableArchitecture(_) => DefinitionKind::DeployableArchitecture,
        }
    }
}

impl<'de> Deserialize<'de> for ConfigDefinitionResponse {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        decode(&value).map_err(de::Error::custom)
    }
}

impl From<StackDefinitionResponse> for ConfigDefinitionResponse {
    fn from(definition: StackDefinitionResponse) -> Self {
        Self::Stack(definition)
    }
}

impl From<ResourceDefinitionResponse> for ConfigDefinitionResponse {
    fn from(definition: ResourceDefinitionResponse) -> Self {
        Self::Resource(definition)
    }
}

impl From<DaDefinitionResponse> for ConfigDefinitionResponse {
    fn from(definition: DaDefinitionResponse) -> Self {
        Self::DeployableArchitecture(definition)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn response(value: Value) -> Result<ConfigDefinitionResponse, DecodeError> {
        decode(&value)
    }

    // -------------------------------------------------------------------------
    // Response family
    // -------------------------------------------------------------------------

    #[test]
    fn test_response_members_resolves_to_stack() {
        let definition = response(json!({
            "description": "d",
            "name": "n",
            "members": [{"name": "m1", "config_id": "c1"}]
        }))
        .unwrap();

        assert_eq!(definition.kind(), DefinitionKind::Stack);
        match definition {
            ConfigDefinitionResponse::Stack(stack) => {
                assert_eq!(stack.members.len(), 1);
                assert_eq!(stack.members[0].config_id, "c1");
            }
            other => panic!("Expected stack, got {other:?}"),
        }
    }

    #[test]
    fn test_response_resource_crns_resolves_to_resource() {
        let definition = response(json!({
            "description": "d",
            "name": "n",
            "resource_crns": ["crn1"]
        }))
        .unwrap();

        assert_eq!(definition.kind(), DefinitionKind::Resource);
        match definition {
            ConfigDefinitionResponse::Resource(resource) => {
                assert_eq!(resource.resource_crns, vec!["crn1"]);
            }
            other => panic!("Expected resource, got {other:?}"),
        }
    }

    #[test]
    fn test_response_locator_id_resolves_to_da() {
        let definition = response(json!({
            "description": "d",
            "name": "n",
            "locator_id": "loc1"
        }))
        .unwrap();

        assert_eq!(definition.kind(), DefinitionKind::DeployableArchitecture);
        assert_eq!(definition.locator_id(), Some("loc1"));
        assert_eq!(definition.name(), "n");
        assert_eq!(definition.description(), "d");
    }

    #[test]
    fn test_response_missing_description_is_named() {
        let err = response(json!({"name": "n", "locator_id": "loc1"})).unwrap_err();
        assert_eq!(
            err,
            DecodeError::MissingField {
                family: DefinitionFamily::Response,
                field: "description",
            }
        );
        assert!(err.to_string().contains("description"));
    }

    #[test]
    fn test_response_without_signal_falls_back_to_da() {
        let err = response(json!({"description": "d", "name": "n"})).unwrap_err();
        assert_eq!(
            err,
            DecodeError::MissingField {
                family: DefinitionFamily::Response,
                field: "locator_id",
            }
        );
    }

    #[test]
    fn test_response_null_signal_is_absent() {
        let definition = response(json!({
            "description": "d",
            "name": "n",
            "resource_crns": null,
            "locator_id": "loc1"
        }))
        .unwrap();
        assert_eq!(definition.kind(), DefinitionKind::DeployableArchitecture);
    }

    #[test]
    fn test_response_conflicting_signals_are_ambiguous() {
        let err = response(json!({
            "description": "d",
            "name": "n",
            "locator_id": "loc1",
            "resource_crns": ["crn1"]
        }))
        .unwrap_err();

        assert_eq!(
            err,
            DecodeError::Ambiguous {
                family: DefinitionFamily::Response,
                fields: vec!["resource_crns", "locator_id"],
            }
        );
    }

    #[test]
    fn test_response_decode_is_deterministic() {
        let value = json!({
            "description": "d",
            "name": "n",
            "locator_id": "loc1",
            "inputs": {"region": "us-south"},
            "authorizations": {"method": "api_key", "api_key": "secret"}
        });

        let first = response(value.clone()).unwrap();
        let second = response(value).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_response_wrong_field_type_is_invalid() {
        let err = response(json!({
            "description": "d",
            "name": 42,
            "locator_id": "loc1"
        }))
        .unwrap_err();

        assert!(matches!(
            err,
            DecodeError::InvalidField {
                family: DefinitionFamily::Response,
                ..
            }
        ));
    }

    #[test]
    fn test_non_object_is_rejected() {
        let err = decode::<ConfigDefinitionResponse>(&json!(["locator_id"])).unwrap_err();
        assert_eq!(
            err,
            DecodeError::NotAnObject {
                family: DefinitionFamily::Response
            }
        );
    }

    #[test]
    fn test_response_serializes_without_tag() {
        let definition = response(json!({
            "description": "d",
            "name": "n",
            "resource_crns": ["crn1"]
        }))
        .unwrap();

        let value = serde_json::to_value(&definition).unwrap();
        assert_eq!(
            value,
            json!({"description": "d", "name": "n", "resource_crns": ["crn1"]})
        );
    }

    #[test]
    fn test_serde_deserialize_routes_through_decoder() {
        let result: Result<ConfigDefinitionResponse, _> =
            serde_json::from_value(json!({"name": "n", "locator_id": "loc1"}));
        let err = result.unwrap_err();
        assert!(err.to_string().contains("description"));
    }

    // -------------------------------------------------------------------------
    // Prototype family
    // -------------------------------------------------------------------------

    #[test]
    fn test_prototype_description_is_optional() {
        let definition: ConfigDefinitionPrototype =
            decode(&json!({"name": "n", "locator_id": "loc1"})).unwrap();
        match definition {
            ConfigDefinitionPrototype::DeployableArchitecture(da) => {
                assert_eq!(da.locator_id, "loc1");
                assert!(da.description.is_none());
            }
            other => panic!("Expected deployable architecture, got {other:?}"),
        }
    }

    #[test]
    fn test_prototype_stack_requires_name() {
        let err = decode::<ConfigDefinitionPrototype>(&json!({
            "members": [{"name": "m1", "config_id": "c1"}]
        }))
        .unwrap_err();
        assert_eq!(
            err,
            DecodeError::MissingField {
                family: DefinitionFamily::Prototype,
                field: "name",
            }
        );
    }

    #[test]
    fn test_prototype_without_signal_reports_locator_id() {
        let err = decode::<ConfigDefinitionPrototype>(&json!({"name": "n"})).unwrap_err();
        assert_eq!(
            err,
            DecodeError::MissingField {
                family: DefinitionFamily::Prototype,
                field: "locator_id",
            }
        );
    }

    // -------------------------------------------------------------------------
    // Patch family
    // -------------------------------------------------------------------------

    #[test]
    fn test_patch_resolves_by_signal() {
        let patch: ConfigDefinitionPatch =
            decode(&json!({"resource_crns": ["crn1", "crn2"]})).unwrap();
        match patch {
            ConfigDefinitionPatch::Resource(resource) => {
                assert_eq!(resource.resource_crns.len(), 2);
                assert!(resource.name.is_none());
            }
            other => panic!("Expected resource patch, got {other:?}"),
        }
    }

    #[test]
    fn test_patch_without_signal_is_unresolved() {
        let err = decode::<ConfigDefinitionPatch>(&json!({"name": "renamed"})).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::Unresolved {
                family: DefinitionFamily::Patch,
                ..
            }
        ));
    }

    #[test]
    fn test_patch_serializes_only_set_fields() {
        let patch = ConfigDefinitionPatch::from(DaDefinitionPatch {
            name: Some("renamed".to_string()),
            ..DaDefinitionPatch::new("loc2")
        });

        let value = serde_json::to_value(&patch).unwrap();
        assert_eq!(value, json!({"name": "renamed", "locator_id": "loc2"}));
    }

    #[test]
    fn test_patch_written_by_serialize_decodes_to_same_variant() {
        let mut inputs = ConfigValues::new();
        inputs.insert("region".to_string(), json!("us-south"));

        let patches = [
            ConfigDefinitionPatch::from(DaDefinitionPatch {
                inputs: Some(inputs.clone()),
                ..DaDefinitionPatch::new("loc-1")
            }),
            ConfigDefinitionPatch::from(ResourceDefinitionPatch {
                description: Some("imported".to_string()),
                ..ResourceDefinitionPatch::new(vec![])
            }),
            ConfigDefinitionPatch::from(StackDefinitionPatch {
                inputs: Some(inputs),
                ..StackDefinitionPatch::new(vec![StackMember {
                    name: "network".to_string(),
                    config_id: "cfg-1".to_string(),
                }])
            }),
        ];

        for patch in patches {
            let value = serde_json::to_value(&patch).unwrap();
            let decoded: ConfigDefinitionPatch = serde_json::from_value(value).unwrap();
            assert_eq!(decoded, patch);
        }
    }
}
