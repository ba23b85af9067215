//! Cloud Projects API model types.

mod config;
pub mod definition;
mod environment;
mod project;
mod resource;

pub use config::*;
pub use definition::{
    ComplianceProfile, ConfigAuth, ConfigDefinitionPatch, ConfigDefinitionPrototype,
    ConfigDefinitionResponse, ConfigValues, DaDefinitionPatch, DaDefinitionPrototype,
    DaDefinitionResponse, DefinitionFamily, DefinitionKind, Polymorphic, ResourceDefinitionPatch,
    ResourceDefinitionPrototype, ResourceDefinitionResponse, StackDefinitionPatch,
    StackDefinitionPrototype, StackDefinitionResponse, StackMember,
};
pub use environment::*;
pub use project::*;
pub use resource::*;

#[cfg(feature = "test-server")]
pub(crate) use project::ProjectPatchBody;
