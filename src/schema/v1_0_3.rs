//! The 1.0.3 object graph: the translation's output.

use super::common::{ActionAnnotation, Annotation, Tag};
use super::graph;
use crate::id_scope::IdScope;
use serde::{Deserialize, Serialize};

/// A port declaration with one structured item per parameter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortSpec {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub optional: bool,
    pub sort_key: i64,
    pub items: Vec<PortSpecItem>,
}

/// The declaration of one parameter of a port.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortSpecItem {
    pub id: i64,
    pub pos: i64,
    pub module: String,
    pub package: Option<String>,
    pub namespace: String,
    pub label: String,
    pub default: String,
    pub values: String,
    pub entry_type: String,
}

/// A named, typed value shared by every workflow of a vistrail.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VistrailVariable {
    pub name: String,
    pub uuid: String,
    pub package: String,
    pub module: String,
    pub namespace: String,
    pub value: String,
}

/// A stored parameter sweep tied to one version of the workflow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterExploration {
    pub id: i64,
    pub action_id: i64,
    pub name: Option<String>,
    pub date: String,
    pub user: Option<String>,
    pub dims: String,
    pub layout: String,
    pub functions: Vec<PEFunction>,
}

/// The port of a concrete module whose parameters are being explored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PEFunction {
    pub id: i64,
    pub module_id: i64,
    pub port_name: String,
    pub is_alias: bool,
    pub parameters: Vec<PEParameter>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PEParameter {
    pub id: i64,
    pub pos: i64,
    pub interpolator: String,
    pub value: String,
    pub dimension: i32,
}

pub type Module = graph::Module<PortSpec>;
pub type Group = graph::Group<PortSpec>;
pub type Workflow = graph::Workflow<PortSpec>;
pub type WorkflowModule = graph::WorkflowModule<PortSpec>;
pub type OperationData = graph::OperationData<PortSpec>;
pub type Operation = graph::Operation<PortSpec>;
pub type Action = graph::Action<PortSpec>;
pub type ModuleDescriptor = graph::ModuleDescriptor<PortSpec>;
pub type Package = graph::Package<PortSpec>;

/// The root versioned workflow document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vistrail {
    pub id: i64,
    pub entity_type: String,
    pub version: String,
    pub name: String,
    pub last_modified: Option<String>,
    pub actions: Vec<Action>,
    pub tags: Vec<Tag>,
    pub annotations: Vec<Annotation>,
    pub action_annotations: Vec<ActionAnnotation>,
    pub vistrail_variables: Vec<VistrailVariable>,
    pub parameter_explorations: Vec<ParameterExploration>,
    /// Allocator for objects added to this vistrail after translation.
    #[serde(skip)]
    pub id_scope: IdScope,
}

impl Vistrail {
    pub fn vistrail_variable(&self, name: &str) -> Option<&VistrailVariable> {
        self.vistrail_variables.iter().find(|v| v.name == name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Registry {
    pub id: i64,
    pub entity_type: String,
    pub version: String,
    pub root_descriptor_id: Option<i64>,
    pub name: String,
    pub last_modified: Option<String>,
    pub packages: Vec<Package>,
    #[serde(skip)]
    pub id_scope: IdScope,
}
