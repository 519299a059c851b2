//! Common test utilities for building legacy documents.
use vistrail_translate::schema::graph::{AddOp, Operation, OperationData};
use vistrail_translate::schema::{ActionAnnotation, Annotation, Function, ObjectKind, Parameter};
use vistrail_translate::schema::{v1_0_2, v1_0_3};

pub const BASIC: &str = "org.vistrails.vistrails.basic";

/// A legacy port spec with the given packed fields.
#[allow(dead_code)]
pub fn legacy_spec(
    id: i64,
    name: &str,
    sigstring: &str,
    defaults: Option<&str>,
    labels: Option<&str>,
) -> v1_0_2::PortSpec {
    v1_0_2::PortSpec {
        id,
        name: name.to_string(),
        ty: "input".to_string(),
        optional: false,
        sort_key: id,
        sigstring: sigstring.to_string(),
        defaults: defaults.map(str::to_string),
        labels: labels.map(str::to_string),
    }
}

/// `(basic:String,basic:Integer)` with defaults and labels for both entries.
#[allow(dead_code)]
pub fn string_int_spec(id: i64) -> v1_0_2::PortSpec {
    legacy_spec(
        id,
        "pair",
        &format!("({BASIC}:String,{BASIC}:Integer)"),
        Some("['abc', '3']"),
        Some("['name', 'count']"),
    )
}

#[allow(dead_code)]
pub fn parameter(id: i64, pos: i64, val: &str) -> Parameter {
    Parameter {
        id,
        pos,
        name: "<no description>".to_string(),
        ty: format!("{BASIC}:Float"),
        val: val.to_string(),
        alias: String::new(),
    }
}

#[allow(dead_code)]
pub fn function(id: i64, name: &str, parameters: Vec<Parameter>) -> Function {
    Function {
        id,
        pos: 0,
        name: name.to_string(),
        parameters,
    }
}

#[allow(dead_code)]
pub fn module(id: i64, name: &str, port_specs: Vec<v1_0_2::PortSpec>) -> v1_0_2::Module {
    v1_0_2::Module {
        id,
        name: name.to_string(),
        package: BASIC.to_string(),
        version: "1.6".to_string(),
        port_specs,
        ..Default::default()
    }
}

#[allow(dead_code)]
pub fn add(id: i64, data: v1_0_2::OperationData, parent: Option<(ObjectKind, i64)>) -> v1_0_2::Operation {
    Operation::Add(AddOp {
        id,
        object_id: id,
        parent_obj_id: parent.map(|(_, pid)| pid),
        parent_obj_type: parent.map(|(kind, _)| kind),
        data,
    })
}

#[allow(dead_code)]
pub fn action(id: i64, prev_id: i64, operations: Vec<v1_0_2::Operation>) -> v1_0_2::Action {
    v1_0_2::Action {
        id,
        prev_id,
        operations,
        ..Default::default()
    }
}

#[allow(dead_code)]
pub fn paramexp_annotation(id: i64, action_id: i64, xml: &str) -> ActionAnnotation {
    ActionAnnotation {
        id,
        action_id,
        key: "__paramexp__".to_string(),
        value: xml.to_string(),
        date: Some("2011-05-04 12:00:00".to_string()),
        user: Some("tester".to_string()),
    }
}

/// A vistrail whose version 2 pipeline holds one module (id 5) with functions
/// 10 `value(p20)`, 11 `range(p21, p22)` and 12 `color(p23)`.
///
/// Action 1 adds the module with functions 10 and 11; action 2 adds function 12 and
/// its parameter through separate operations.
#[allow(dead_code)]
pub fn explored_vistrail(annotations: Vec<ActionAnnotation>) -> v1_0_2::Vistrail {
    let mut m = module(5, "Float", vec![]);
    m.functions = vec![
        function(10, "value", vec![parameter(20, 0, "1.0")]),
        function(
            11,
            "range",
            vec![parameter(21, 0, "0.0"), parameter(22, 1, "10.0")],
        ),
    ];
    let actions = vec![
        action(1, 0, vec![add(100, OperationData::Module(m), None)]),
        action(
            2,
            1,
            vec![
                add(
                    101,
                    OperationData::Function(function(12, "color", vec![])),
                    Some((ObjectKind::Module, 5)),
                ),
                add(
                    102,
                    OperationData::Parameter(parameter(23, 2, "0.5")),
                    Some((ObjectKind::Function, 12)),
                ),
            ],
        ),
    ];
    v1_0_2::Vistrail {
        id: 1,
        entity_type: "vistrail".to_string(),
        version: "1.0.2".to_string(),
        name: "explored".to_string(),
        actions,
        action_annotations: annotations,
        ..Default::default()
    }
}

#[allow(dead_code)]
pub fn vars_annotation(id: i64, value: &str) -> Annotation {
    Annotation {
        id,
        key: "__vistrail_vars__".to_string(),
        value: value.to_string(),
    }
}

/// Wraps a `<paramexp>` body the way legacy files store it.
#[allow(dead_code)]
pub fn paramexp_xml(functions: &str) -> String {
    format!(
        "<paramexps><paramexp dims=\"[2, 1, 1, 1]\" layout=\"{{}}\" date=\"2011-05-04 12:00:00\">{}</paramexp></paramexps>",
        functions
    )
}

#[allow(dead_code)]
pub fn item_modules(spec: &v1_0_3::PortSpec) -> Vec<&str> {
    spec.items.iter().map(|i| i.module.as_str()).collect()
}
