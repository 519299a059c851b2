use crate::error::MaterializeError;
use crate::schema::v1_0_2::Vistrail;
use crate::schema::{Function, ObjectKind, Parameter};

mod replay;

pub use replay::ActionReplay;

/// The module graph as it stood at one point of a vistrail's history.
///
/// Only what the translation needs is kept: modules (including abstractions and
/// groups) with their functions and parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pipeline {
    pub modules: Vec<PipelineModule>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineModule {
    pub id: i64,
    pub kind: ObjectKind,
    pub name: String,
    pub functions: Vec<Function>,
}

impl Pipeline {
    /// Finds the function with the given id and the module that owns it.
    pub fn find_function(&self, function_id: i64) -> Option<(&PipelineModule, &Function)> {
        self.modules.iter().find_map(|m| {
            m.functions
                .iter()
                .find(|f| f.id == function_id)
                .map(|f| (m, f))
        })
    }

    pub fn find_parameter(&self, parameter_id: i64) -> Option<&Parameter> {
        self.modules
            .iter()
            .flat_map(|m| &m.functions)
            .flat_map(|f| &f.parameters)
            .find(|p| p.id == parameter_id)
    }

    pub fn module(&self, kind: ObjectKind, id: i64) -> Option<&PipelineModule> {
        self.modules.iter().find(|m| m.kind == kind && m.id == id)
    }
}

/// Reconstructs the pipeline of a vistrail at a given action.
///
/// Legacy parameter explorations refer to functions and parameters by raw id, and
/// those ids only mean something relative to the pipeline at the exploration's action.
/// The translator asks its materializer for that pipeline. [`ActionReplay`] is the
/// default; implement this trait to plug in a cached or database-backed version tree.
///
/// # Example
///
/// ```rust,no_run
/// use vistrail_translate::error::MaterializeError;
/// use vistrail_translate::pipeline::{Materialize, Pipeline};
/// use vistrail_translate::schema::v1_0_2::Vistrail;
///
/// struct EmptyPipelines;
///
/// impl Materialize for EmptyPipelines {
///     fn materialize(&self, _vistrail: &Vistrail, _action_id: i64) -> Result<Pipeline, MaterializeError> {
///         Ok(Pipeline::default())
///     }
/// }
/// ```
pub trait Materialize: Send + Sync {
    fn materialize(&self, vistrail: &Vistrail, action_id: i64) -> Result<Pipeline, MaterializeError>;
}
