//! Leaf objects whose shape is identical in schema 1.0.2 and 1.0.3.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Structural type tags, as used by an operation's `what` and `parentObjType` fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ObjectKind {
    Module,
    Abstraction,
    Group,
    PortSpec,
    Function,
    Parameter,
    Connection,
    Port,
    Location,
    Annotation,
    #[serde(rename = "plugin_data")]
    PluginData,
    Other,
}

impl ObjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::Module => "module",
            ObjectKind::Abstraction => "abstraction",
            ObjectKind::Group => "group",
            ObjectKind::PortSpec => "portSpec",
            ObjectKind::Function => "function",
            ObjectKind::Parameter => "parameter",
            ObjectKind::Connection => "connection",
            ObjectKind::Port => "port",
            ObjectKind::Location => "location",
            ObjectKind::Annotation => "annotation",
            ObjectKind::PluginData => "plugin_data",
            ObjectKind::Other => "other",
        }
    }

    /// Modules, abstractions and groups all occupy a slot in the pipeline graph.
    pub fn is_module_like(&self) -> bool {
        matches!(
            self,
            ObjectKind::Module | ObjectKind::Abstraction | ObjectKind::Group
        )
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: i64,
    pub x: f64,
    pub y: f64,
}

/// Generic key/value note attached to a module, workflow, action or vistrail.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: i64,
    pub key: String,
    pub value: String,
}

/// A key/value note attached to one action of a vistrail's version tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionAnnotation {
    pub id: i64,
    pub action_id: i64,
    pub key: String,
    pub value: String,
    pub date: Option<String>,
    pub user: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub id: i64,
    pub pos: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub val: String,
    pub alias: String,
}

/// A value set on one of a module's input ports.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Function {
    pub id: i64,
    pub pos: i64,
    pub name: String,
    pub parameters: Vec<Parameter>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Port {
    pub id: i64,
    #[serde(rename = "type")]
    pub ty: String,
    pub module_id: i64,
    pub module_name: String,
    pub name: String,
    pub signature: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub id: i64,
    pub ports: Vec<Port>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PluginData {
    pub id: i64,
    pub data: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Other {
    pub id: i64,
    pub key: String,
    pub value: String,
}

/// A named version in a vistrail's version tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}
