//! Tests for pipeline reconstruction by action replay.
mod common;
use common::*;
use vistrail_translate::error::MaterializeError;
use vistrail_translate::pipeline::{ActionReplay, Materialize};
use vistrail_translate::schema::ObjectKind;
use vistrail_translate::schema::graph::{ChangeOp, DeleteOp, Operation, OperationData};

#[test]
fn test_replay_collects_modules_functions_and_parameters() {
    let vistrail = explored_vistrail(vec![]);
    let pipeline = ActionReplay.materialize(&vistrail, 2).unwrap();

    assert_eq!(pipeline.modules.len(), 1);
    let (module, function) = pipeline.find_function(12).unwrap();
    assert_eq!(module.id, 5);
    assert_eq!(function.name, "color");
    assert_eq!(pipeline.find_parameter(23).unwrap().pos, 2);
    assert!(pipeline.module(ObjectKind::Module, 5).is_some());
}

#[test]
fn test_replay_stops_at_requested_version() {
    let vistrail = explored_vistrail(vec![]);
    let pipeline = ActionReplay.materialize(&vistrail, 1).unwrap();
    assert!(pipeline.find_function(10).is_some());
    assert!(pipeline.find_function(12).is_none());
}

#[test]
fn test_root_version_is_empty() {
    let pipeline = ActionReplay.materialize(&explored_vistrail(vec![]), 0).unwrap();
    assert!(pipeline.modules.is_empty());
}

#[test]
fn test_delete_and_change_operations() {
    let mut vistrail = explored_vistrail(vec![]);
    vistrail.actions.push(action(
        3,
        2,
        vec![
            Operation::Delete(DeleteOp {
                id: 200,
                what: ObjectKind::Function,
                object_id: 10,
                parent_obj_id: Some(5),
                parent_obj_type: Some(ObjectKind::Module),
            }),
            Operation::Change(ChangeOp {
                id: 201,
                old_obj_id: 23,
                new_obj_id: 24,
                parent_obj_id: Some(12),
                parent_obj_type: Some(ObjectKind::Function),
                data: OperationData::Parameter(parameter(24, 2, "0.9")),
            }),
        ],
    ));
    let pipeline = ActionReplay.materialize(&vistrail, 3).unwrap();
    assert!(pipeline.find_function(10).is_none());
    assert!(pipeline.find_parameter(23).is_none());
    assert_eq!(pipeline.find_parameter(24).unwrap().val, "0.9");
}

#[test]
fn test_unknown_and_cyclic_histories() {
    let vistrail = explored_vistrail(vec![]);
    assert_eq!(
        ActionReplay.materialize(&vistrail, 42).unwrap_err(),
        MaterializeError::UnknownAction(42)
    );

    let mut cyclic = explored_vistrail(vec![]);
    cyclic.actions[0].prev_id = 2;
    assert!(matches!(
        ActionReplay.materialize(&cyclic, 2),
        Err(MaterializeError::CyclicHistory(_))
    ));
}
