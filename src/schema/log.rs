use super::common::Annotation;
use serde::{Deserialize, Serialize};

/// Execution provenance for a vistrail. Unchanged between 1.0.2 and 1.0.3 apart from
/// its version tag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Log {
    pub id: i64,
    pub entity_type: String,
    pub version: String,
    pub name: String,
    pub last_modified: Option<String>,
    pub vistrail_id: Option<i64>,
    pub machines: Vec<Machine>,
    pub workflow_execs: Vec<WorkflowExec>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Machine {
    pub id: i64,
    pub name: String,
    pub os: String,
    pub architecture: String,
    pub processor: String,
    pub ram: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowExec {
    pub id: i64,
    pub user: String,
    pub ip: String,
    pub session: Option<i64>,
    pub vt_version: String,
    pub ts_start: String,
    pub ts_end: Option<String>,
    pub parent_id: Option<i64>,
    pub parent_type: Option<String>,
    pub parent_version: Option<i64>,
    pub completed: i32,
    pub name: Option<String>,
    pub annotations: Vec<Annotation>,
    pub module_execs: Vec<ModuleExec>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleExec {
    pub id: i64,
    pub ts_start: String,
    pub ts_end: Option<String>,
    pub cached: bool,
    pub module_id: i64,
    pub module_name: String,
    pub completed: i32,
    pub error: Option<String>,
    pub machine_id: Option<i64>,
    pub annotations: Vec<Annotation>,
}
