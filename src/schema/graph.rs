//! The module/workflow/action graph shared by both schema versions.
//!
//! Between 1.0.2 and 1.0.3 only the representation of port specs changed, so every
//! container that can hold a port spec is generic over it. The `try_map_specs` methods
//! are the version-upgrade primitive: they copy every shared field and hand each port
//! spec to a caller-supplied function, which decides how the new representation is
//! built.

use super::common::{
    Annotation, Connection, Function, Location, ObjectKind, Other, Parameter, PluginData, Port,
};
use crate::error::TranslateError;
use serde::{Deserialize, Serialize};

/// Where a port spec was found during a traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecSite {
    /// The `port_specs` of a module inside a workflow or an operation payload.
    Module,
    /// The `port_specs` of a registry module descriptor.
    ModuleDescriptor,
    /// The payload of an add or change operation whose `what` is `portSpec`.
    Operation,
}

fn map_specs<S, T, F>(site: SpecSite, specs: &[S], f: &mut F) -> Result<Vec<T>, TranslateError>
where
    F: FnMut(SpecSite, &S) -> Result<T, TranslateError>,
{
    specs.iter().map(|s| f(site, s)).collect()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Module<S> {
    pub id: i64,
    pub cache: i32,
    pub name: String,
    pub namespace: Option<String>,
    pub package: String,
    pub version: String,
    pub location: Option<Location>,
    pub functions: Vec<Function>,
    pub annotations: Vec<Annotation>,
    pub port_specs: Vec<S>,
}

impl<S> Module<S> {
    pub fn try_map_specs<T, F>(&self, f: &mut F) -> Result<Module<T>, TranslateError>
    where
        F: FnMut(SpecSite, &S) -> Result<T, TranslateError>,
    {
        Ok(Module {
            id: self.id,
            cache: self.cache,
            name: self.name.clone(),
            namespace: self.namespace.clone(),
            package: self.package.clone(),
            version: self.version.clone(),
            location: self.location.clone(),
            functions: self.functions.clone(),
            annotations: self.annotations.clone(),
            port_specs: map_specs(SpecSite::Module, &self.port_specs, f)?,
        })
    }
}

/// A reference to a subworkflow stored elsewhere in the vistrail.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Abstraction {
    pub id: i64,
    pub cache: i32,
    pub name: String,
    pub namespace: Option<String>,
    pub package: String,
    pub version: String,
    pub internal_version: String,
    pub location: Option<Location>,
    pub functions: Vec<Function>,
    pub annotations: Vec<Annotation>,
}

/// A module that embeds an entire subworkflow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Group<S> {
    pub id: i64,
    pub cache: i32,
    pub name: String,
    pub namespace: Option<String>,
    pub package: String,
    pub version: String,
    pub location: Option<Location>,
    pub functions: Vec<Function>,
    pub annotations: Vec<Annotation>,
    pub workflow: Workflow<S>,
}

impl<S> Group<S> {
    pub fn try_map_specs<T, F>(&self, f: &mut F) -> Result<Group<T>, TranslateError>
    where
        F: FnMut(SpecSite, &S) -> Result<T, TranslateError>,
    {
        let workflow = self
            .workflow
            .try_map_specs(f)
            .map_err(|e| TranslateError::Group {
                group_id: self.id,
                source: Box::new(e),
            })?;
        Ok(Group {
            id: self.id,
            cache: self.cache,
            name: self.name.clone(),
            namespace: self.namespace.clone(),
            package: self.package.clone(),
            version: self.version.clone(),
            location: self.location.clone(),
            functions: self.functions.clone(),
            annotations: self.annotations.clone(),
            workflow,
        })
    }
}

/// One entry of a workflow's module list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "vtType", rename_all = "camelCase")]
pub enum WorkflowModule<S> {
    Module(Module<S>),
    Abstraction(Abstraction),
    Group(Group<S>),
}

impl<S> WorkflowModule<S> {
    pub fn id(&self) -> i64 {
        match self {
            WorkflowModule::Module(m) => m.id,
            WorkflowModule::Abstraction(a) => a.id,
            WorkflowModule::Group(g) => g.id,
        }
    }

    pub fn kind(&self) -> ObjectKind {
        match self {
            WorkflowModule::Module(_) => ObjectKind::Module,
            WorkflowModule::Abstraction(_) => ObjectKind::Abstraction,
            WorkflowModule::Group(_) => ObjectKind::Group,
        }
    }

    pub fn try_map_specs<T, F>(&self, f: &mut F) -> Result<WorkflowModule<T>, TranslateError>
    where
        F: FnMut(SpecSite, &S) -> Result<T, TranslateError>,
    {
        Ok(match self {
            WorkflowModule::Module(m) => WorkflowModule::Module(m.try_map_specs(f)?),
            WorkflowModule::Abstraction(a) => WorkflowModule::Abstraction(a.clone()),
            WorkflowModule::Group(g) => WorkflowModule::Group(g.try_map_specs(f)?),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Workflow<S> {
    pub id: i64,
    pub entity_type: String,
    pub name: String,
    pub version: String,
    pub last_modified: Option<String>,
    pub vistrail_id: Option<i64>,
    pub modules: Vec<WorkflowModule<S>>,
    pub connections: Vec<Connection>,
    pub annotations: Vec<Annotation>,
    pub plugin_datas: Vec<PluginData>,
    pub others: Vec<Other>,
}

impl<S> Workflow<S> {
    /// Copies the workflow, recursing into group subworkflows. The version tag is
    /// copied as-is; drivers stamp the root.
    pub fn try_map_specs<T, F>(&self, f: &mut F) -> Result<Workflow<T>, TranslateError>
    where
        F: FnMut(SpecSite, &S) -> Result<T, TranslateError>,
    {
        let modules = self
            .modules
            .iter()
            .map(|m| m.try_map_specs(f))
            .collect::<Result<_, _>>()?;
        Ok(Workflow {
            id: self.id,
            entity_type: self.entity_type.clone(),
            name: self.name.clone(),
            version: self.version.clone(),
            last_modified: self.last_modified.clone(),
            vistrail_id: self.vistrail_id,
            modules,
            connections: self.connections.clone(),
            annotations: self.annotations.clone(),
            plugin_datas: self.plugin_datas.clone(),
            others: self.others.clone(),
        })
    }

    /// Visits every module, abstraction and group, including those nested in groups.
    pub fn for_each_module(&self, visit: &mut impl FnMut(ObjectKind, i64)) {
        for module in &self.modules {
            visit(module.kind(), module.id());
            if let WorkflowModule::Group(group) = module {
                group.workflow.for_each_module(visit);
            }
        }
    }
}

/// Strongly typed payload of an add or change operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "what", content = "data", rename_all = "camelCase")]
pub enum OperationData<S> {
    Module(Module<S>),
    Abstraction(Abstraction),
    Group(Group<S>),
    PortSpec(S),
    Function(Function),
    Parameter(Parameter),
    Connection(Connection),
    Port(Port),
    Location(Location),
    Annotation(Annotation),
    #[serde(rename = "plugin_data")]
    PluginData(PluginData),
    Other(Other),
}

impl<S> OperationData<S> {
    /// The `what` tag naming this payload's structural type.
    pub fn what(&self) -> ObjectKind {
        match self {
            OperationData::Module(_) => ObjectKind::Module,
            OperationData::Abstraction(_) => ObjectKind::Abstraction,
            OperationData::Group(_) => ObjectKind::Group,
            OperationData::PortSpec(_) => ObjectKind::PortSpec,
            OperationData::Function(_) => ObjectKind::Function,
            OperationData::Parameter(_) => ObjectKind::Parameter,
            OperationData::Connection(_) => ObjectKind::Connection,
            OperationData::Port(_) => ObjectKind::Port,
            OperationData::Location(_) => ObjectKind::Location,
            OperationData::Annotation(_) => ObjectKind::Annotation,
            OperationData::PluginData(_) => ObjectKind::PluginData,
            OperationData::Other(_) => ObjectKind::Other,
        }
    }

    pub fn try_map_specs<T, F>(&self, f: &mut F) -> Result<OperationData<T>, TranslateError>
    where
        F: FnMut(SpecSite, &S) -> Result<T, TranslateError>,
    {
        Ok(match self {
            OperationData::Module(m) => OperationData::Module(m.try_map_specs(f)?),
            OperationData::Group(g) => OperationData::Group(g.try_map_specs(f)?),
            OperationData::PortSpec(s) => OperationData::PortSpec(f(SpecSite::Operation, s)?),
            OperationData::Abstraction(a) => OperationData::Abstraction(a.clone()),
            OperationData::Function(x) => OperationData::Function(x.clone()),
            OperationData::Parameter(x) => OperationData::Parameter(x.clone()),
            OperationData::Connection(x) => OperationData::Connection(x.clone()),
            OperationData::Port(x) => OperationData::Port(x.clone()),
            OperationData::Location(x) => OperationData::Location(x.clone()),
            OperationData::Annotation(x) => OperationData::Annotation(x.clone()),
            OperationData::PluginData(x) => OperationData::PluginData(x.clone()),
            OperationData::Other(x) => OperationData::Other(x.clone()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddOp<S> {
    pub id: i64,
    pub object_id: i64,
    pub parent_obj_id: Option<i64>,
    pub parent_obj_type: Option<ObjectKind>,
    pub data: OperationData<S>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeOp<S> {
    pub id: i64,
    pub old_obj_id: i64,
    pub new_obj_id: i64,
    pub parent_obj_id: Option<i64>,
    pub parent_obj_type: Option<ObjectKind>,
    pub data: OperationData<S>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteOp {
    pub id: i64,
    pub what: ObjectKind,
    pub object_id: i64,
    pub parent_obj_id: Option<i64>,
    pub parent_obj_type: Option<ObjectKind>,
}

/// One edit inside an action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Operation<S> {
    Add(AddOp<S>),
    Change(ChangeOp<S>),
    Delete(DeleteOp),
}

impl<S> Operation<S> {
    pub fn id(&self) -> i64 {
        match self {
            Operation::Add(op) => op.id,
            Operation::Change(op) => op.id,
            Operation::Delete(op) => op.id,
        }
    }

    pub fn what(&self) -> ObjectKind {
        match self {
            Operation::Add(op) => op.data.what(),
            Operation::Change(op) => op.data.what(),
            Operation::Delete(op) => op.what,
        }
    }

    pub fn try_map_specs<T, F>(&self, f: &mut F) -> Result<Operation<T>, TranslateError>
    where
        F: FnMut(SpecSite, &S) -> Result<T, TranslateError>,
    {
        Ok(match self {
            Operation::Add(op) => Operation::Add(AddOp {
                id: op.id,
                object_id: op.object_id,
                parent_obj_id: op.parent_obj_id,
                parent_obj_type: op.parent_obj_type,
                data: op.data.try_map_specs(f)?,
            }),
            Operation::Change(op) => Operation::Change(ChangeOp {
                id: op.id,
                old_obj_id: op.old_obj_id,
                new_obj_id: op.new_obj_id,
                parent_obj_id: op.parent_obj_id,
                parent_obj_type: op.parent_obj_type,
                data: op.data.try_map_specs(f)?,
            }),
            Operation::Delete(op) => Operation::Delete(op.clone()),
        })
    }
}

/// One node of the version tree: an ordered batch of operations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Action<S> {
    pub id: i64,
    pub prev_id: i64,
    pub date: Option<String>,
    pub session: Option<i64>,
    pub user: Option<String>,
    pub operations: Vec<Operation<S>>,
    pub annotations: Vec<Annotation>,
}

impl<S> Action<S> {
    /// Copies the action with its operations in their original order.
    pub fn try_map_specs<T, F>(&self, f: &mut F) -> Result<Action<T>, TranslateError>
    where
        F: FnMut(SpecSite, &S) -> Result<T, TranslateError>,
    {
        let operations = self
            .operations
            .iter()
            .map(|op| op.try_map_specs(f))
            .collect::<Result<_, _>>()
            .map_err(|e| TranslateError::Action {
                action_id: self.id,
                source: Box::new(e),
            })?;
        Ok(Action {
            id: self.id,
            prev_id: self.prev_id,
            date: self.date.clone(),
            session: self.session,
            user: self.user.clone(),
            operations,
            annotations: self.annotations.clone(),
        })
    }
}

/// A module type offered by a package in the registry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleDescriptor<S> {
    pub id: i64,
    pub name: String,
    pub package: String,
    pub namespace: Option<String>,
    pub package_version: String,
    pub version: String,
    pub base_descriptor_id: Option<i64>,
    pub port_specs: Vec<S>,
}

impl<S> ModuleDescriptor<S> {
    pub fn try_map_specs<T, F>(&self, f: &mut F) -> Result<ModuleDescriptor<T>, TranslateError>
    where
        F: FnMut(SpecSite, &S) -> Result<T, TranslateError>,
    {
        Ok(ModuleDescriptor {
            id: self.id,
            name: self.name.clone(),
            package: self.package.clone(),
            namespace: self.namespace.clone(),
            package_version: self.package_version.clone(),
            version: self.version.clone(),
            base_descriptor_id: self.base_descriptor_id,
            port_specs: map_specs(SpecSite::ModuleDescriptor, &self.port_specs, f)?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Package<S> {
    pub id: i64,
    pub name: String,
    pub identifier: String,
    pub codepath: String,
    pub load_configuration: i32,
    pub version: String,
    pub description: String,
    pub module_descriptors: Vec<ModuleDescriptor<S>>,
}

impl<S> Package<S> {
    pub fn try_map_specs<T, F>(&self, f: &mut F) -> Result<Package<T>, TranslateError>
    where
        F: FnMut(SpecSite, &S) -> Result<T, TranslateError>,
    {
        let module_descriptors = self
            .module_descriptors
            .iter()
            .map(|d| d.try_map_specs(f))
            .collect::<Result<_, _>>()
            .map_err(|e| TranslateError::Package {
                identifier: self.identifier.clone(),
                source: Box::new(e),
            })?;
        Ok(Package {
            id: self.id,
            name: self.name.clone(),
            identifier: self.identifier.clone(),
            codepath: self.codepath.clone(),
            load_configuration: self.load_configuration,
            version: self.version.clone(),
            description: self.description.clone(),
            module_descriptors,
        })
    }
}
