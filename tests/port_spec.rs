//! Tests for the port spec transcoder.
mod common;
use common::*;
use vistrail_translate::error::{DecodeError, LiteralError, TranslateError};
use vistrail_translate::id_scope::{IdScope, vt_type};
use vistrail_translate::transcode::{
    SignatureEntry, copy_shared_fields, parse_literal_list, parse_signature, transcode_port_spec,
};

#[test]
fn test_signature_entries() {
    let entries = parse_signature("(pkg:Module,Bare,pkg:Mod:ns:extra)").unwrap();
    assert_eq!(
        entries,
        vec![
            SignatureEntry {
                package: Some("pkg".to_string()),
                module: "Module".to_string(),
                namespace: String::new(),
            },
            SignatureEntry {
                package: None,
                module: "Bare".to_string(),
                namespace: String::new(),
            },
            SignatureEntry {
                package: Some("pkg".to_string()),
                module: "Mod".to_string(),
                namespace: "ns:extra".to_string(),
            },
        ]
    );
}

#[test]
fn test_empty_signatures() {
    assert!(parse_signature("").unwrap().is_empty());
    assert!(parse_signature("()").unwrap().is_empty());
}

#[test]
fn test_malformed_signatures() {
    assert!(matches!(
        parse_signature("pkg:Module"),
        Err(DecodeError::UnbalancedSignature(_))
    ));
    assert!(matches!(
        parse_signature("(pkg:A,,pkg:B)"),
        Err(DecodeError::EmptySignatureEntry { position: 1, .. })
    ));
}

#[test]
fn test_literal_lists() {
    assert_eq!(
        parse_literal_list(Some("['a', 'b']")).unwrap(),
        vec!["a".to_string(), "b".to_string()]
    );
    assert_eq!(parse_literal_list(Some("(1, None)")).unwrap(), vec!["1", ""]);
    assert_eq!(parse_literal_list(Some("'solo'")).unwrap(), vec!["solo"]);
    assert!(parse_literal_list(None).unwrap().is_empty());
    assert!(parse_literal_list(Some("  ")).unwrap().is_empty());
}

#[test]
fn test_transcode_builds_one_item_per_entry() {
    let mut ids = IdScope::new();
    let spec = transcode_port_spec(&string_int_spec(7), &mut ids).unwrap();

    assert_eq!(spec.id, 7);
    assert_eq!(spec.name, "pair");
    assert_eq!(item_modules(&spec), vec!["String", "Integer"]);

    let first = &spec.items[0];
    assert_eq!(first.id, 0);
    assert_eq!(first.pos, 0);
    assert_eq!(first.package.as_deref(), Some(BASIC));
    assert_eq!(first.default, "abc");
    assert_eq!(first.label, "name");
    assert_eq!(spec.items[1].id, 1);
    assert_eq!(spec.items[1].pos, 1);
    assert_eq!(spec.items[1].default, "3");
    assert_eq!(spec.items[1].label, "count");
    assert!(spec.items.iter().all(|i| i.values.is_empty() && i.entry_type.is_empty()));
}

#[test]
fn test_short_defaults_are_padded() {
    let old = legacy_spec(
        1,
        "triple",
        "(a:A,b:B,c:C)",
        Some("['x']"),
        None,
    );
    let spec = transcode_port_spec(&old, &mut IdScope::new()).unwrap();
    let defaults: Vec<_> = spec.items.iter().map(|i| i.default.as_str()).collect();
    let labels: Vec<_> = spec.items.iter().map(|i| i.label.as_str()).collect();
    assert_eq!(defaults, vec!["x", "", ""]);
    assert_eq!(labels, vec!["", "", ""]);
}

#[test]
fn test_extra_defaults_are_ignored() {
    let old = legacy_spec(1, "one", "(a:A)", Some("['x', 'y', 'z']"), None);
    let spec = transcode_port_spec(&old, &mut IdScope::new()).unwrap();
    assert_eq!(spec.items.len(), 1);
    assert_eq!(spec.items[0].default, "x");
}

#[test]
fn test_empty_signature_allocates_nothing() {
    let mut ids = IdScope::new();
    let spec = transcode_port_spec(&legacy_spec(3, "none", "()", None, None), &mut ids).unwrap();
    assert!(spec.items.is_empty());
    assert_eq!(ids.peek_id(vt_type::PORT_SPEC_ITEM), 0);
}

#[test]
fn test_item_ids_continue_across_specs() {
    let mut ids = IdScope::new();
    transcode_port_spec(&string_int_spec(1), &mut ids).unwrap();
    let second = transcode_port_spec(&string_int_spec(2), &mut ids).unwrap();
    let item_ids: Vec<_> = second.items.iter().map(|i| i.id).collect();
    assert_eq!(item_ids, vec![2, 3]);
}

#[test]
fn test_bad_defaults_name_the_field() {
    let old = legacy_spec(9, "broken", "(a:A)", Some("['x'"), None);
    let err = transcode_port_spec(&old, &mut IdScope::new()).unwrap_err();
    assert!(matches!(
        err,
        TranslateError::PortSpec { id: 9, field: "defaults", .. }
    ));
    assert!(err.to_string().contains("broken"));
}

#[test]
fn test_copy_shared_fields_has_no_items() {
    let copy = copy_shared_fields(&string_int_spec(4));
    assert_eq!(copy.id, 4);
    assert_eq!(copy.ty, "input");
    assert!(copy.items.is_empty());
}

#[test]
fn test_deeply_nested_defaults_fail_the_spec() {
    let nested = format!("{}{}", "[".repeat(2000), "]".repeat(2000));
    let old = legacy_spec(1, "p", "(a:A)", Some(&nested), None);
    let err = transcode_port_spec(&old, &mut IdScope::new()).unwrap_err();
    assert!(matches!(
        err,
        TranslateError::PortSpec {
            field: "defaults",
            source: DecodeError::Literal(LiteralError::TooDeep { .. }),
            ..
        }
    ));
}

#[test]
fn test_large_integer_defaults_are_kept() {
    let old = legacy_spec(1, "p", "(a:A,b:B)", Some("[12345678901234567890, 1e16]"), None);
    let spec = transcode_port_spec(&old, &mut IdScope::new()).unwrap();
    assert_eq!(spec.items[0].default, "12345678901234567890");
    assert_eq!(spec.items[1].default, "1e+16");
}
