//! The 1.0.2 object graph: the translation's input.

use super::common::{ActionAnnotation, Annotation, Tag};
use super::graph;
use serde::{Deserialize, Serialize};

/// A port declaration in its packed 1.0.2 form.
///
/// `sigstring` lists the port's parameter types, e.g.
/// `(org.vistrails.vistrails.basic:String,org.vistrails.vistrails.basic:Integer)`;
/// `defaults` and `labels` hold the Python `repr` of a list of strings, zipped
/// positionally with the signature.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortSpec {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub optional: bool,
    pub sort_key: i64,
    pub sigstring: String,
    pub defaults: Option<String>,
    pub labels: Option<String>,
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
///
/// Vistrail variables and parameter explorations are still stored as reserved
/// annotations in this version (`__vistrail_vars__` on the vistrail, `__paramexp__`
/// on an action).
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
}
