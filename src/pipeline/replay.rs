use super::{Materialize, Pipeline, PipelineModule};
use crate::error::MaterializeError;
use crate::schema::v1_0_2::{Action, Operation, OperationData, Vistrail};
use crate::schema::ObjectKind;
use ahash::{AHashMap, AHashSet};

/// Id of the implicit empty version every action chain starts from.
const ROOT_VERSION: i64 = 0;

/// Materializes a pipeline by replaying every action from the root of the version
/// tree down to the requested action.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActionReplay;

impl Materialize for ActionReplay {
    fn materialize(&self, vistrail: &Vistrail, action_id: i64) -> Result<Pipeline, MaterializeError> {
        let actions: AHashMap<i64, &Action> = vistrail.actions.iter().map(|a| (a.id, a)).collect();

        let mut chain = Vec::new();
        let mut visited = AHashSet::new();
        let mut current = action_id;
        while current != ROOT_VERSION {
            if !visited.insert(current) {
                return Err(MaterializeError::CyclicHistory(current));
            }
            let action = actions
                .get(&current)
                .ok_or(MaterializeError::UnknownAction(current))?;
            chain.push(*action);
            current = action.prev_id;
        }

        let mut pipeline = Pipeline::default();
        for action in chain.iter().rev() {
            for op in &action.operations {
                apply(&mut pipeline, op);
            }
        }
        tracing::trace!(
            action_id,
            replayed = chain.len(),
            modules = pipeline.modules.len(),
            "materialized pipeline"
        );
        Ok(pipeline)
    }
}

fn apply(pipeline: &mut Pipeline, op: &Operation) {
    match op {
        Operation::Add(add) => {
            insert(pipeline, &add.data, add.parent_obj_id, add.parent_obj_type);
        }
        Operation::Change(change) => {
            remove(
                pipeline,
                change.data.what(),
                change.old_obj_id,
                change.parent_obj_id,
                change.parent_obj_type,
            );
            insert(
                pipeline,
                &change.data,
                change.parent_obj_id,
                change.parent_obj_type,
            );
        }
        Operation::Delete(delete) => remove(
            pipeline,
            delete.what,
            delete.object_id,
            delete.parent_obj_id,
            delete.parent_obj_type,
        ),
    }
}

fn parent_module<'a>(
    pipeline: &'a mut Pipeline,
    parent_id: Option<i64>,
    parent_kind: Option<ObjectKind>,
) -> Option<&'a mut PipelineModule> {
    let parent_id = parent_id?;
    pipeline
        .modules
        .iter_mut()
        .find(|m| m.id == parent_id && parent_kind.is_none_or(|k| k == m.kind))
}

fn insert(
    pipeline: &mut Pipeline,
    data: &OperationData,
    parent_id: Option<i64>,
    parent_kind: Option<ObjectKind>,
) {
    let module = |id: i64, name: &str, functions: &[crate::schema::Function]| PipelineModule {
        id,
        kind: data.what(),
        name: name.to_string(),
        functions: functions.to_vec(),
    };
    match data {
        OperationData::Module(m) => pipeline.modules.push(module(m.id, &m.name, &m.functions)),
        OperationData::Abstraction(a) => {
            pipeline.modules.push(module(a.id, &a.name, &a.functions))
        }
        OperationData::Group(g) => pipeline.modules.push(module(g.id, &g.name, &g.functions)),
        OperationData::Function(function) => {
            if let Some(owner) = parent_module(pipeline, parent_id, parent_kind) {
                owner.functions.push(function.clone());
            }
        }
        OperationData::Parameter(parameter) => {
            let Some(parent_id) = parent_id else {
                return;
            };
            if let Some(function) = pipeline
                .modules
                .iter_mut()
                .flat_map(|m| m.functions.iter_mut())
                .find(|f| f.id == parent_id)
            {
                function.parameters.push(parameter.clone());
            }
        }
        // Connections, locations and annotations do not affect function lookups.
        _ => {}
    }
}

fn remove(
    pipeline: &mut Pipeline,
    kind: ObjectKind,
    id: i64,
    parent_id: Option<i64>,
    parent_kind: Option<ObjectKind>,
) {
    match kind {
        k if k.is_module_like() => pipeline.modules.retain(|m| !(m.kind == k && m.id == id)),
        ObjectKind::Function => match parent_module(pipeline, parent_id, parent_kind) {
            Some(owner) => owner.functions.retain(|f| f.id != id),
            None => {
                for m in &mut pipeline.modules {
                    m.functions.retain(|f| f.id != id);
                }
            }
        },
        ObjectKind::Parameter => {
            for function in pipeline
                .modules
                .iter_mut()
                .flat_map(|m| m.functions.iter_mut())
                .filter(|f| parent_id.is_none_or(|p| p == f.id))
            {
                function.parameters.retain(|p| p.id != id);
            }
        }
        _ => {}
    }
}
